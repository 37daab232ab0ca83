//! Tile Memory - a matching-pairs minigame engine
//!
//! This crate provides the core logic for the memory puzzle that unlocks the
//! elevator in the scene:
//! - Sixteen tiles holding eight pair values, shuffled once per game
//! - A selection state machine with match evaluation and scoring
//! - Timed concealment of mismatched pairs driven by frame ticks
//! - A presenter that maps game events onto a renderer
//!
//! # Architecture
//!
//! The engine is platform-agnostic and free of I/O. Hosts feed it pointer
//! input and frame deltas and receive [`GameEvent`]s back. It can be compiled
//! to native Rust or to WebAssembly (`wasm` feature).
//!
//! # Modules
//!
//! - [`tile`]: Pair values, palette and grid layout
//! - [`board`]: The shuffled sixteen-tile board
//! - [`game`]: Selection and match state machine
//! - [`presenter`]: Adapter from game events to a scene
//! - [`bot`]: Autoplayer

pub mod actions;
pub mod board;
pub mod bot;
pub mod game;
pub mod presenter;
pub mod tile;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{Board, BoardError};
pub use bot::{Bot, BotDifficulty};
pub use game::{
    pairs_found_message, GamePhase, GameSnapshot, MemoryGame, PendingMismatch, SelectionRejected,
    StateError, TileSnapshot, MISMATCH_DELAY, VICTORY_MESSAGE,
};
pub use presenter::{Presenter, SceneView, HOVER_TEXT};
pub use tile::{Color, PairValue, Tile, TileIndex, TileLayout, PAIR_COUNT, TILE_COUNT};
