//! Core game state machine.
//!
//! This module contains the `MemoryGame` struct: tile selection, match
//! evaluation, scoring and the timed reset of mismatched pairs.

use crate::actions::{GameAction, GameEvent};
use crate::board::Board;
use crate::tile::{PairValue, TileIndex, PAIR_COUNT, TILE_COUNT};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds a mismatched pair stays face up before it is concealed
pub const MISMATCH_DELAY: f64 = 0.5;

/// Status text shown once every pair has been found
pub const VICTORY_MESSAGE: &str = "Congratulations! Elevator is now active.";

/// Status text shown after each confirmed match
pub fn pairs_found_message(score: u8) -> String {
    format!("Pairs found: {}/{}", score, PAIR_COUNT)
}

/// Reasons a selection is ignored.
///
/// `select_tile` never surfaces these; they exist so callers can explain
/// (or log) why nothing happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum SelectionRejected {
    #[error("Tile {0} is not on the board")]
    OutOfRange(TileIndex),

    #[error("Input is disabled while a pair is being resolved")]
    InputDisabled,

    #[error("Tile is already matched")]
    Locked,

    #[error("Tile is already selected")]
    AlreadySelected,
}

/// Errors from restoring a serialized game whose fields contradict each other
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum StateError {
    #[error("Score {score} does not match {locked} locked tiles")]
    ScoreMismatch { score: u8, locked: usize },

    #[error("{0} pending mismatches, at most one is allowed")]
    TooManyPending(usize),

    #[error("Pending mismatch refers to an unplayable tile")]
    InvalidPending,

    #[error("Input must be disabled while a mismatch is pending")]
    InputNotGated,

    #[error("First selection {0} is not an unlocked tile")]
    InvalidSelection(TileIndex),
}

/// Two revealed tiles that did not match, waiting to be concealed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingMismatch {
    pub first: TileIndex,
    pub second: TileIndex,
    /// Seconds since the mismatch was detected
    pub elapsed: f64,
}

/// Game phase, derived from the selection state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing selected
    AwaitingFirstPick,
    /// One tile face up, waiting for its partner
    AwaitingSecondPick { first: TileIndex },
    /// A mismatched pair is on display; input is gated
    ResolvingMismatch,
    /// Every pair found
    Solved,
}

/// The complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MemoryGameRepr")]
pub struct MemoryGame {
    board: Board,
    /// Confirmed pairs (0-8)
    score: u8,
    /// Index of the pending first pick
    first_selection: Option<TileIndex>,
    /// Cleared while a pick is being evaluated or a mismatch is on display
    input_enabled: bool,
    /// Mismatches waiting to be concealed; never more than one
    pending: Vec<PendingMismatch>,
}

/// Wire form of a game, checked before it becomes a [`MemoryGame`]
#[derive(Deserialize)]
struct MemoryGameRepr {
    board: Board,
    score: u8,
    first_selection: Option<TileIndex>,
    input_enabled: bool,
    pending: Vec<PendingMismatch>,
}

impl TryFrom<MemoryGameRepr> for MemoryGame {
    type Error = StateError;

    fn try_from(repr: MemoryGameRepr) -> Result<Self, Self::Error> {
        let locked = repr.board.locked_count();
        if locked != repr.score as usize * 2 {
            return Err(StateError::ScoreMismatch {
                score: repr.score,
                locked,
            });
        }

        if repr.pending.len() > 1 {
            return Err(StateError::TooManyPending(repr.pending.len()));
        }
        let playable = |i: TileIndex| i < TILE_COUNT && !repr.board.is_locked(i);
        for p in &repr.pending {
            if p.first == p.second || !playable(p.first) || !playable(p.second) {
                return Err(StateError::InvalidPending);
            }
            if repr.input_enabled {
                return Err(StateError::InputNotGated);
            }
        }

        if let Some(first) = repr.first_selection {
            if !playable(first) {
                return Err(StateError::InvalidSelection(first));
            }
        }

        Ok(Self {
            board: repr.board,
            score: repr.score,
            first_selection: repr.first_selection,
            input_enabled: repr.input_enabled,
            pending: repr.pending,
        })
    }
}

impl MemoryGame {
    /// Create a new game on a freshly shuffled board
    pub fn new() -> Self {
        Self::with_board(Board::shuffled())
    }

    /// Create a new game whose board is generated from a seed
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_board(Board::shuffled_with_rng(&mut rng))
    }

    /// Create a new game on a given board
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            score: 0,
            first_selection: None,
            input_enabled: true,
            pending: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn first_selection(&self) -> Option<TileIndex> {
        self.first_selection
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    pub fn pending(&self) -> &[PendingMismatch] {
        &self.pending
    }

    /// Check if every pair has been found
    pub fn is_solved(&self) -> bool {
        self.score as usize == PAIR_COUNT
    }

    /// Current phase of play
    pub fn phase(&self) -> GamePhase {
        if self.is_solved() {
            GamePhase::Solved
        } else if !self.pending.is_empty() {
            GamePhase::ResolvingMismatch
        } else if let Some(first) = self.first_selection {
            GamePhase::AwaitingSecondPick { first }
        } else {
            GamePhase::AwaitingFirstPick
        }
    }

    /// Explain whether a selection of `index` would be accepted
    pub fn check_selectable(&self, index: TileIndex) -> Result<(), SelectionRejected> {
        if index >= TILE_COUNT {
            return Err(SelectionRejected::OutOfRange(index));
        }
        if !self.input_enabled {
            return Err(SelectionRejected::InputDisabled);
        }
        if self.board.is_locked(index) {
            return Err(SelectionRejected::Locked);
        }
        if self.first_selection == Some(index) {
            return Err(SelectionRejected::AlreadySelected);
        }
        Ok(())
    }

    pub fn is_selectable(&self, index: TileIndex) -> bool {
        self.check_selectable(index).is_ok()
    }

    /// Check if a tile is currently showing its value
    pub fn is_face_up(&self, index: TileIndex) -> bool {
        self.board.is_locked(index)
            || self.first_selection == Some(index)
            || self
                .pending
                .iter()
                .any(|p| p.first == index || p.second == index)
    }

    /// Apply an action to the game state
    pub fn apply_action(&mut self, action: GameAction) -> Vec<GameEvent> {
        match action {
            GameAction::SelectTile(index) => self.select_tile(index),
            GameAction::Advance(dt) => self.advance(dt),
        }
    }

    /// Attempt to select a tile.
    ///
    /// Illegal selections (locked tile, gated input, re-picking the first
    /// tile, out of range) are ignored and produce no events.
    pub fn select_tile(&mut self, index: TileIndex) -> Vec<GameEvent> {
        if self.check_selectable(index).is_err() {
            return Vec::new();
        }
        let Some(value) = self.board.pair_value(index) else {
            return Vec::new();
        };

        let mut events = vec![GameEvent::TileRevealed { index, value }];

        match self.first_selection {
            None => self.first_selection = Some(index),
            Some(first) => events.extend(self.evaluate_match(first, index)),
        }

        events
    }

    /// Compare two revealed tiles and either lock them or queue a reset
    fn evaluate_match(&mut self, first: TileIndex, second: TileIndex) -> Vec<GameEvent> {
        self.input_enabled = false;

        let mut events = Vec::new();

        if self.values_match(first, second) {
            self.board.lock(first);
            self.board.lock(second);
            self.score += 1;

            events.push(GameEvent::PairMatched {
                first,
                second,
                score: self.score,
            });
            events.push(GameEvent::StatusChanged {
                text: pairs_found_message(self.score),
            });

            if self.is_solved() {
                events.push(GameEvent::StatusChanged {
                    text: VICTORY_MESSAGE.to_string(),
                });
                events.push(GameEvent::Victory);
            }

            self.reset_selection();
        } else {
            // first_selection stays set until the timer resolves
            self.pending.push(PendingMismatch {
                first,
                second,
                elapsed: 0.0,
            });
            events.push(GameEvent::Mismatched { first, second });
        }

        events
    }

    fn values_match(&self, first: TileIndex, second: TileIndex) -> bool {
        let a: Option<PairValue> = self.board.pair_value(first);
        a.is_some() && a == self.board.pair_value(second)
    }

    /// Advance the mismatch timers by `dt` seconds.
    ///
    /// Called every frame regardless of game state.
    pub fn advance(&mut self, dt: f64) -> Vec<GameEvent> {
        let dt = dt.max(0.0);
        let mut events = Vec::new();

        let mut i = 0;
        while i < self.pending.len() {
            self.pending[i].elapsed += dt;

            if self.pending[i].elapsed >= MISMATCH_DELAY {
                let resolved = self.pending.remove(i);
                events.push(GameEvent::TileConcealed {
                    index: resolved.first,
                });
                events.push(GameEvent::TileConcealed {
                    index: resolved.second,
                });
                self.reset_selection();
            } else {
                i += 1;
            }
        }

        events
    }

    fn reset_selection(&mut self) {
        self.first_selection = None;
        self.input_enabled = true;
    }

    /// Serializable view of the game that hides face-down values
    pub fn snapshot(&self) -> GameSnapshot {
        let tiles = self
            .board
            .tiles()
            .iter()
            .enumerate()
            .map(|(index, tile)| {
                let face_up = self.is_face_up(index);
                TileSnapshot {
                    index,
                    value: face_up.then_some(tile.pair_value),
                    locked: tile.locked,
                }
            })
            .collect();

        GameSnapshot {
            tiles,
            score: self.score,
            phase: self.phase(),
            input_enabled: self.input_enabled,
        }
    }
}

impl Default for MemoryGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Public view of a single tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSnapshot {
    pub index: TileIndex,
    /// Present only while the tile is face up
    pub value: Option<PairValue>,
    pub locked: bool,
}

/// Public view of the whole game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tiles: Vec<TileSnapshot>,
    pub score: u8,
    pub phase: GamePhase,
    pub input_enabled: bool,
}
