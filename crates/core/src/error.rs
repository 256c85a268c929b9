//! Error types for m715-core.

use thiserror::Error;

/// Core library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Index outside its valid range (DPI level, macro number, profile).
    #[error("value out of range: {field} = {value} (allowed {min}..={max})")]
    OutOfRange {
        field: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },

    /// Button slot with no canonical name in the button table.
    #[error("invalid button: {0} has no name in the button table")]
    InvalidButton(usize),

    /// Profile store snapshot is malformed.
    #[error("snapshot error: {0}")]
    Snapshot(String),

    /// Snapshot JSON could not be parsed or written.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
