use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Room error: {0}")]
    Room(#[from] RoomError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Registry-level failures reported back to the requesting client.
///
/// The display strings are part of the wire contract: they are sent
/// verbatim in the `error` field of a client view.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomError {
    #[error("The room already exists.")]
    AlreadyExists,

    #[error("The room does not exist.")]
    NotExists,

    #[error("The room is already full.")]
    AlreadyFull,
}
