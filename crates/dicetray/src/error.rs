// ABOUTME: Error types for the dicetray library.
// ABOUTME: Covers the help short-circuit and malformed constraint flags.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The help flag was seen. Not a failure, but the roll is aborted and
    /// the rendered usage listing should be surfaced as-is.
    #[error("{0}")]
    Help(String),

    /// An unrecognized flag or a non-integer flag argument. Carries the
    /// rendered message; the roll is aborted.
    #[error("{0}")]
    InvalidArgs(String),
}

pub type Result<T> = std::result::Result<T, Error>;
