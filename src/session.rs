//! Per-connection session state.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, warn};
use uuid::Uuid;

use crate::protocol::ClientView;

/// Where a connection sits in the matchmaking state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientStatus {
    /// Not in a room; may create or join one.
    #[default]
    Searching,
    /// Created a room, waiting for an opponent.
    Waiting,
    /// Matched in a room with a game in progress.
    Playing,
}

/// Server-side state for one client connection.
///
/// Holds the connection's outbound sender for its lifetime; all status
/// and room transitions are driven by the server's command dispatch,
/// the session itself only projects its view.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    pub status: ClientStatus,
    pub room_name: Option<String>,
    tx: mpsc::UnboundedSender<Message>,
}

impl Session {
    pub fn new(tx: mpsc::UnboundedSender<Message>) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: ClientStatus::default(),
            room_name: None,
            tx,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn view(&self) -> ClientView {
        ClientView {
            kind: "client".to_string(),
            status: self.status,
            room: self.room_name.clone(),
            error: None,
        }
    }

    /// Queue a JSON payload on the connection's outbound channel.
    ///
    /// A closed channel means the connection is already going away;
    /// that is logged and otherwise ignored.
    pub fn send<T: Serialize>(&self, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(text) => {
                if self.tx.send(Message::Text(text)).is_err() {
                    warn!("session {}: send on closed connection", self.id);
                }
            }
            Err(e) => {
                error!("session {}: failed to serialize payload: {}", self.id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> (Session, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Session::new(tx), rx)
    }

    #[test]
    fn new_session_is_searching() {
        let (session, _rx) = session();
        assert_eq!(session.status, ClientStatus::Searching);
        assert_eq!(session.room_name, None);
    }

    #[test]
    fn view_reflects_status_and_room() {
        let (mut session, _rx) = session();
        session.status = ClientStatus::Waiting;
        session.room_name = Some("1234".to_string());

        let view = session.view();
        assert_eq!(view.kind, "client");
        assert_eq!(view.status, ClientStatus::Waiting);
        assert_eq!(view.room.as_deref(), Some("1234"));
        assert_eq!(view.error, None);
    }

    #[test]
    fn status_serializes_screaming() {
        assert_eq!(
            serde_json::to_string(&ClientStatus::Searching).unwrap(),
            "\"SEARCHING\""
        );
        assert_eq!(
            serde_json::to_string(&ClientStatus::Playing).unwrap(),
            "\"PLAYING\""
        );
    }

    #[test]
    fn send_queues_serialized_payload() {
        let (session, mut rx) = session();
        session.send(&session.view());

        match rx.try_recv() {
            Ok(Message::Text(text)) => {
                let value: serde_json::Value = serde_json::from_str(&text).unwrap();
                assert_eq!(value["type"], "client");
                assert_eq!(value["status"], "SEARCHING");
            }
            other => panic!("expected text frame, got {other:?}"),
        }
    }
}
