pub mod config;
pub mod error;
pub mod game;
pub mod protocol;
pub mod registry;
pub mod room;
pub mod server;
pub mod session;

pub use error::{AppError, RoomError};
pub type Result<T> = std::result::Result<T, AppError>;

pub use crate::config::Settings;
pub use server::GameServer;
