//! WebAssembly bindings for the memory game.
//!
//! This module exposes the game to JavaScript through wasm-bindgen. The host
//! calls `selectTile` from its pointer handler and `advance` from its frame
//! system, then applies the returned events to its own entities.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::game::MemoryGame;
#[cfg(feature = "wasm")]
use crate::presenter::HOVER_TEXT;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// WASM-exposed game wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmMemoryGame {
    state: MemoryGame,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmMemoryGame {
    /// Create a new game on a shuffled board
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmMemoryGame {
        WasmMemoryGame {
            state: MemoryGame::new(),
        }
    }

    /// Create a game from a seed (deterministic layout)
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(seed: u64) -> WasmMemoryGame {
        WasmMemoryGame {
            state: MemoryGame::with_seed(seed),
        }
    }

    /// Attempt to select a tile, returns events JSON
    #[wasm_bindgen(js_name = selectTile)]
    pub fn select_tile(&mut self, index: usize) -> String {
        let events = self.state.select_tile(index);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Advance timers by `dt` seconds, returns events JSON
    #[wasm_bindgen(js_name = advance)]
    pub fn advance(&mut self, dt: f64) -> String {
        let events = self.state.advance(dt);
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }

    /// Hover hint for a tile, or undefined if it cannot be picked
    #[wasm_bindgen(js_name = hoverText)]
    pub fn hover_text(&self, index: usize) -> Option<String> {
        self.state
            .is_selectable(index)
            .then(|| HOVER_TEXT.to_string())
    }

    /// Get the public game snapshot as JSON
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        serde_json::to_string(&self.state.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Confirmed pairs so far
    #[wasm_bindgen(js_name = getScore)]
    pub fn get_score(&self) -> u8 {
        self.state.score()
    }

    /// Check if every pair has been found
    #[wasm_bindgen(js_name = isSolved)]
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }
}

#[cfg(feature = "wasm")]
impl Default for WasmMemoryGame {
    fn default() -> Self {
        Self::new()
    }
}
