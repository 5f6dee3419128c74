//! Error kinds that end a run.
//!
//! Malformed subnet entries are not errors; they are counted by the expander.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    /// Connection, TLS, timeout or body read failure.
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-2xx status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    /// Search page carried no usable anti-forgery token.
    #[error("could not find __RequestVerificationToken on {url}")]
    MissingToken { url: String },

    /// Export response did not have the expected table layout.
    #[error("unexpected table shape: {0}")]
    TableShape(String),

    /// Output file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ListError {
    /// Process exit status for this error kind.
    pub fn exit_code(&self) -> u8 {
        match self {
            ListError::Network(_) | ListError::HttpStatus { .. } => 2,
            ListError::MissingToken { .. } => 3,
            ListError::TableShape(_) => 4,
            ListError::Io { .. } | ListError::Config(_) => 1,
        }
    }
}
