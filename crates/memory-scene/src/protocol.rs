//! Line protocol spoken on stdin/stdout.
//!
//! Each input line is either a JSON [`ClientMessage`] or a shorthand command
//! (`3`, `select 3`, `hover 3`, `state`, `quit`). Every response is one JSON
//! [`ServerMessage`] per line.

use memory_core::{GameEvent, GameSnapshot, TileIndex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Messages sent from the console to the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Pointer down on a tile
    SelectTile { index: TileIndex },

    /// Ask for the hover hint of a tile
    Hover { index: TileIndex },

    /// Request the current snapshot
    State,

    /// End the session
    Quit,
}

/// Messages sent from the scene to the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Events produced by a pick or a frame
    Events { events: Vec<GameEvent> },

    /// Full game snapshot plus scene extras
    State {
        game: GameSnapshot,
        status: Option<String>,
        elevator_active: bool,
        elevator_height: f32,
    },

    /// Hover hint (null when the tile cannot be picked)
    Hover {
        index: TileIndex,
        text: Option<String>,
    },

    /// A line could not be understood
    Error { message: String },

    /// Session ended
    Bye,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command '{0}'")]
    Unknown(String),

    #[error("Expected a tile index, got '{0}'")]
    BadIndex(String),

    #[error("Invalid JSON message: {0}")]
    BadJson(String),
}

/// Parse one input line
pub fn parse_command(line: &str) -> Result<ClientMessage, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(CommandError::Empty);
    }

    if line.starts_with('{') {
        return serde_json::from_str(line).map_err(|e| CommandError::BadJson(e.to_string()));
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();

    match (head.as_str(), arg) {
        ("state", None) => Ok(ClientMessage::State),
        ("quit" | "exit", None) => Ok(ClientMessage::Quit),
        ("select" | "pick", Some(raw)) => Ok(ClientMessage::SelectTile {
            index: parse_index(raw)?,
        }),
        ("hover", Some(raw)) => Ok(ClientMessage::Hover {
            index: parse_index(raw)?,
        }),
        (raw, None) if raw.chars().all(|c| c.is_ascii_digit()) => Ok(ClientMessage::SelectTile {
            index: parse_index(raw)?,
        }),
        _ => Err(CommandError::Unknown(line.to_string())),
    }
}

fn parse_index(raw: &str) -> Result<TileIndex, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::BadIndex(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_shorthand() {
        assert_eq!(
            parse_command("7"),
            Ok(ClientMessage::SelectTile { index: 7 })
        );
        assert_eq!(
            parse_command("  select 12 "),
            Ok(ClientMessage::SelectTile { index: 12 })
        );
        assert_eq!(
            parse_command("HOVER 3"),
            Ok(ClientMessage::Hover { index: 3 })
        );
        assert_eq!(parse_command("state"), Ok(ClientMessage::State));
        assert_eq!(parse_command("quit"), Ok(ClientMessage::Quit));
    }

    #[test]
    fn test_json() {
        assert_eq!(
            parse_command(r#"{"type":"SelectTile","payload":{"index":4}}"#),
            Ok(ClientMessage::SelectTile { index: 4 })
        );
        assert_eq!(parse_command(r#"{"type":"State"}"#), Ok(ClientMessage::State));
        assert!(matches!(
            parse_command(r#"{"type":"Teleport"}"#),
            Err(CommandError::BadJson(_))
        ));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(
            parse_command("select x"),
            Err(CommandError::BadIndex("x".to_string()))
        );
        assert_eq!(
            parse_command("dance"),
            Err(CommandError::Unknown("dance".to_string()))
        );
        assert_eq!(
            parse_command("select"),
            Err(CommandError::Unknown("select".to_string()))
        );
    }

    #[test]
    fn test_server_message_shape() {
        let msg = ServerMessage::Hover {
            index: 2,
            text: Some("Reveal".to_string()),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "Hover");
        assert_eq!(json["payload"]["text"], "Reveal");

        let bye = serde_json::to_string(&ServerMessage::Bye).unwrap();
        assert_eq!(bye, r#"{"type":"Bye"}"#);
    }
}
