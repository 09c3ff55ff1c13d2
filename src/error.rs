//! Crate error type

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArcadeError {
    #[error("could not open capture device {source_name}: {reason}")]
    CaptureOpen { source_name: String, reason: String },

    #[error("could not read frame from capture device: {0}")]
    CaptureRead(String),

    #[error("display error: {0}")]
    Display(String),

    #[error("malformed recording at line {line}: {source}")]
    Recording {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings file {path:?}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
