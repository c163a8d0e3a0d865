//! Error types for session state and export

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
