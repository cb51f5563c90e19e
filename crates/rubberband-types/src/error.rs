//! Error types for rubberband.

use std::io;

/// Errors produced by the rubberband library.
#[derive(Debug, thiserror::Error)]
pub enum RubberbandError {
    #[error("config error: {0}")]
    Config(String),

    #[error("setup error: {0}")]
    Setup(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RubberbandError>;
