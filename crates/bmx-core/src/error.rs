//! Unified error types for the harness

use thiserror::Error;

/// Unified error type for all harness operations
#[derive(Error, Debug)]
pub enum HarnessError {
    // Target application unreachable at suite start
    #[error("connection error: {0}")]
    Connection(String),

    // Browser launch / CDP errors
    #[error("browser error: {0}")]
    Browser(String),

    // Errors raised mid-session (crash, navigation failure)
    #[error("session error: {0}")]
    Session(String),

    // Artifact storage errors
    #[error("artifact error: {0}")]
    Artifact(String),

    // Configuration errors
    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // Generic
    #[error("{0}")]
    Other(String),
}

/// Result type alias using HarnessError
pub type Result<T> = std::result::Result<T, HarnessError>;
