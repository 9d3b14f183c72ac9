//! Crate error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A shape name that is not circle, triangle or plus
    #[error("unknown shape kind: {0:?}")]
    UnknownShape(String),

    #[error("tick period must be greater than zero")]
    InvalidPeriod,

    #[error("invalid figure size range {min}..={max}")]
    InvalidSizeRange { min: i32, max: i32 },

    #[error("could not parse command: {0}")]
    Command(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings are not valid JSON: {0}")]
    Settings(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
