//! Inputs the board accepts and the events it emits in response.
//!
//! Events are the only channel from the board to the outside world; the
//! presenter turns them into paint calls, status text and the victory
//! trigger.

use crate::tile::{PairValue, TileIndex};
use serde::{Deserialize, Serialize};

/// Everything that can be fed into the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    /// A pointer went down on a tile
    SelectTile(TileIndex),
    /// A frame elapsed (seconds)
    Advance(f64),
}

/// Events that occur as a result of actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tile was turned face up
    TileRevealed { index: TileIndex, value: PairValue },

    /// A tile was turned back to neutral after a mismatch
    TileConcealed { index: TileIndex },

    /// Two revealed tiles share a value and are now locked
    PairMatched {
        first: TileIndex,
        second: TileIndex,
        score: u8,
    },

    /// Two revealed tiles differ; they will be concealed after the delay
    Mismatched { first: TileIndex, second: TileIndex },

    /// Text for the status display
    StatusChanged { text: String },

    /// The last pair was found
    Victory,
}

impl GameEvent {
    /// Status text carried by this event, if any
    pub fn status_text(&self) -> Option<&str> {
        match self {
            GameEvent::StatusChanged { text } => Some(text),
            _ => None,
        }
    }
}
