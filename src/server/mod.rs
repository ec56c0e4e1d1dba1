//! WebSocket server and per-connection command dispatch.
//!
//! One task pair per connection: a receive loop feeding the dispatcher
//! and a send task forwarding the session's outbound channel to the
//! socket. All session and room state lives behind a single lock, and
//! every reply a command produces is queued before the lock is
//! released, so both occupants observe one event's broadcasts as a
//! unit.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, Mutex};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::protocol::Command;
use crate::registry::Registry;
use crate::room::Room;
use crate::session::{ClientStatus, Session};

#[derive(Debug, Default)]
struct SharedState {
    sessions: HashMap<Uuid, Session>,
    registry: Registry,
}

/// The matchmaking server: owns every session and the room registry.
#[derive(Debug, Default)]
pub struct GameServer {
    state: Mutex<SharedState>,
}

impl GameServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drive one accepted TCP connection for its whole lifetime:
    /// WebSocket handshake, session registration, message loop, and
    /// teardown of the session's room on disconnect.
    pub async fn handle_connection(self: Arc<Self>, raw_stream: TcpStream, addr: SocketAddr) {
        let ws_stream = match tokio_tungstenite::accept_async(raw_stream).await {
            Ok(ws) => ws,
            Err(e) => {
                error!("Error during WebSocket handshake with {}: {}", addr, e);
                return;
            }
        };

        let (mut ws_sink, mut ws_stream) = ws_stream.split();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let id = self.register(tx.clone()).await;
        info!("connected: {} ({})", id, addr);

        // Forward queued payloads to the socket.
        let send_task = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                if let Err(e) = ws_sink.send(message).await {
                    error!("Error sending WebSocket message: {}", e);
                    break;
                }
            }
            let _ = ws_sink.close().await;
        });

        let server = self.clone();
        let receive_task = tokio::spawn(async move {
            while let Some(message) = ws_stream.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        info!("{}> {}", id, text);
                        server.handle_command(id, &text).await;
                    }
                    Ok(Message::Ping(data)) => {
                        let _ = tx.send(Message::Pong(data));
                    }
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        error!("Error receiving WebSocket message from {}: {}", id, e);
                        break;
                    }
                }
            }
        });

        tokio::select! {
            _ = send_task => {}
            _ = receive_task => {}
        }

        self.disconnect(id).await;
        info!("disconnected: {} ({})", id, addr);
    }

    /// Insert a fresh session holding the connection's outbound sender.
    pub(crate) async fn register(&self, tx: mpsc::UnboundedSender<Message>) -> Uuid {
        let session = Session::new(tx);
        let id = session.id();
        self.state.lock().await.sessions.insert(id, session);
        id
    }

    /// Remove a session and tear down its room if one is still
    /// registered. The remaining occupant is not notified.
    pub(crate) async fn disconnect(&self, id: Uuid) {
        let mut state = self.state.lock().await;
        if let Some(session) = state.sessions.remove(&id) {
            if let Some(room_name) = session.room_name {
                state.registry.remove(&room_name);
            }
        }
    }

    /// Dispatch one inbound line against the sender's current status.
    ///
    /// Commands that are unrecognized, malformed, or not valid in the
    /// sender's state are dropped without a reply.
    pub(crate) async fn handle_command(&self, id: Uuid, line: &str) {
        let command = Command::parse(line);

        let mut state = self.state.lock().await;
        let SharedState { sessions, registry } = &mut *state;

        let Some(status) = sessions.get(&id).map(|session| session.status) else {
            return;
        };
        debug!(session = %id, ?status, ?command, rooms = registry.len(), "dispatch");

        match (status, command) {
            (ClientStatus::Searching, Command::Create(name)) => {
                match registry.create(&name, id) {
                    Ok(key) => {
                        if let Some(session) = sessions.get_mut(&id) {
                            session.status = ClientStatus::Waiting;
                            session.room_name = Some(key);
                            session.send(&session.view());
                        }
                    }
                    Err(err) => {
                        if let Some(session) = sessions.get(&id) {
                            session.send(&session.view().with_error(err));
                        }
                    }
                }
            }

            (ClientStatus::Searching, Command::Join(name)) => {
                match registry.join(&name, id) {
                    Ok(key) => {
                        // Both occupants learn their new status before
                        // seeing the opening board, cross seat first.
                        if let Some(room) = registry.get(&key) {
                            for occupant in room.occupants() {
                                if let Some(session) = sessions.get_mut(&occupant) {
                                    session.status = ClientStatus::Playing;
                                    session.room_name = Some(key.clone());
                                    session.send(&session.view());
                                    session.send(&room.view_for(occupant));
                                }
                            }
                        }
                    }
                    Err(err) => {
                        if let Some(session) = sessions.get(&id) {
                            session.send(&session.view().with_error(err));
                        }
                    }
                }
            }

            (ClientStatus::Waiting, Command::Leave) => {
                if let Some(session) = sessions.get_mut(&id) {
                    if let Some(room_name) = session.room_name.take() {
                        registry.remove(&room_name);
                    }
                    session.status = ClientStatus::Searching;
                    session.send(&session.view());
                }
            }

            (ClientStatus::Playing, Command::Put { row, col }) => {
                if let Some(room_name) = sessions.get(&id).and_then(|s| s.room_name.clone()) {
                    if let Some(room) = registry.get_mut(&room_name) {
                        // An illegal move is a no-op; the unchanged
                        // board is re-broadcast either way.
                        room.board_mut().put(row, col);
                        broadcast_room(sessions, room);
                    }
                }
            }

            (ClientStatus::Playing, Command::Restart) => {
                if let Some(room_name) = sessions.get(&id).and_then(|s| s.room_name.clone()) {
                    if let Some(room) = registry.get_mut(&room_name) {
                        room.board_mut().reset();
                        broadcast_room(sessions, room);
                    }
                }
            }

            (ClientStatus::Playing, Command::Exit) => {
                if let Some(room_name) = sessions.get(&id).and_then(|s| s.room_name.clone()) {
                    if let Some(room) = registry.remove(&room_name) {
                        for occupant in room.occupants() {
                            if let Some(session) = sessions.get_mut(&occupant) {
                                session.status = ClientStatus::Searching;
                                session.room_name = None;
                                session.send(&session.view());
                            }
                        }
                    }
                }
            }

            _ => {}
        }
    }
}

/// Send each occupant its own seat-relative view of the room.
fn broadcast_room(sessions: &HashMap<Uuid, Session>, room: &Room) {
    for occupant in room.occupants() {
        if let Some(session) = sessions.get(&occupant) {
            session.send(&room.view_for(occupant));
        }
    }
}
