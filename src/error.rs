use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the card repository. Data-quality problems inside the
/// catalog are never errors; only a catalog that cannot be read at all is.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Card data file not found at {0}")]
    NotFound(PathBuf),

    #[error("Failed to read card data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode card data from {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Search limit must be at least 1")]
    InvalidLimit,
}

/// Errors shown to the user verbatim by the command error handler.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("❌ {0}")]
    InvalidLookupArgs(String),

    #[error("❌ {0}")]
    InvalidFilterInput(String),

    #[error("❌ You do not have permission to use this command.")]
    NotAdmin,
}
