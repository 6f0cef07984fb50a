//! Error types for deck synthesis.
//!
//! A synthesis request either returns a complete artifact or exactly one of
//! these errors; partial decks are never surfaced. An unknown template id is
//! not an error (the resolver falls back to the default theme).
use thiserror::Error;

/// Result type for synthesis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for synthesis operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The input deck was rejected before any rendering took place.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A slide could not be rendered into well-formed markup.
    #[error("render failure: {0}")]
    Render(String),

    /// Archive assembly could not produce a structurally valid container.
    /// The package invariants make this unreachable from valid part sets,
    /// so any occurrence indicates an internal defect.
    #[error("packaging failure: {0}")]
    Packaging(String),

    /// The wall-clock budget for the whole pipeline was exceeded.
    #[error("synthesis timed out")]
    Timeout,

    /// IO error surfaced by the file-save convenience; never produced by
    /// the in-memory pipeline.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
