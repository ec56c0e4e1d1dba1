//! Wire protocol: inbound text commands and outbound JSON views.
//!
//! Clients send one whitespace-delimited command per frame; the server
//! replies with JSON payloads tagged by a `type` field. Anything that
//! does not parse maps to [`Command::Unrecognized`], which handlers
//! silently drop.

use serde::{Deserialize, Serialize};

use crate::error::RoomError;
use crate::session::ClientStatus;

/// Parsed inbound command.
///
/// `create` and `join` take the remainder of the line after the first
/// space as the room name; `put` takes two integer coordinates. Wrong
/// argument counts or non-integer coordinates fall through to
/// `Unrecognized` rather than producing an error reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(String),
    Join(String),
    Leave,
    Put { row: i32, col: i32 },
    Restart,
    Exit,
    Unrecognized,
}

impl Command {
    pub fn parse(line: &str) -> Command {
        let mut parts = line.splitn(2, ' ');
        let verb = parts.next().unwrap_or_default();
        let rest = parts.next().unwrap_or_default().trim();

        match verb {
            "create" if !rest.is_empty() => Command::Create(rest.to_string()),
            "join" if !rest.is_empty() => Command::Join(rest.to_string()),
            "leave" if rest.is_empty() => Command::Leave,
            "restart" if rest.is_empty() => Command::Restart,
            "exit" if rest.is_empty() => Command::Exit,
            "put" => match rest.split_whitespace().collect::<Vec<_>>()[..] {
                [row, col] => match (row.parse(), col.parse()) {
                    (Ok(row), Ok(col)) => Command::Put { row, col },
                    _ => Command::Unrecognized,
                },
                _ => Command::Unrecognized,
            },
            _ => Command::Unrecognized,
        }
    }
}

/// Serialized snapshot of one session, sent to its own connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientView {
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ClientStatus,
    pub room: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl ClientView {
    pub fn with_error(mut self, err: RoomError) -> Self {
        self.error = Some(err.to_string());
        self
    }
}

/// Serialized snapshot of a board, optionally seat-relative.
///
/// `isMyTurn` and `result` are present only in room-scoped views;
/// `result` additionally requires the game to be over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameView {
    #[serde(rename = "type")]
    pub kind: String,
    pub board: [[i8; 3]; 3],
    #[serde(rename = "elapsedTurn")]
    pub elapsed_turn: u32,
    #[serde(rename = "currentTurn")]
    pub current_turn: u8,
    #[serde(rename = "isEnded")]
    pub is_ended: bool,
    #[serde(
        rename = "isMyTurn",
        skip_serializing_if = "Option::is_none",
        default
    )]
    pub is_my_turn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<String>,
}
