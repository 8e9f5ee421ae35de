//! Error types for theme backends.
//!
//! The controller itself never fails: backend errors are logged and the
//! controller carries on with whatever state it already has.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThemeError {
    /// Persistent storage rejected a read or write
    #[error("storage error: {0}")]
    Storage(String),

    /// The styling target could not be updated
    #[error("styling error: {0}")]
    Styling(String),

    /// A platform capability is missing (no window, document, storage...)
    #[error("{0} is not available")]
    Unavailable(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
