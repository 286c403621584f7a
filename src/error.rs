//! Error types for height-field reconstruction.

use thiserror::Error;

/// Result type for reconstruction operations.
pub type Result<T> = std::result::Result<T, ReconstructionError>;

/// Errors that can occur while loading, repairing or assembling a height-field.
#[derive(Debug, Error)]
pub enum ReconstructionError {
    /// The raw buffer holds fewer bytes than the declared dimensions need.
    #[error("truncated input: expected {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Byte count required by `width * height * 4`.
        expected: usize,
        /// Byte count actually available.
        actual: usize,
    },

    /// The declared dimensions cannot describe the data.
    #[error("dimension mismatch for {width}x{height}: {reason}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        reason: String,
    },

    /// Every cell of the grid is missing or non-finite.
    #[error("no valid samples to interpolate from")]
    NoValidSamples,

    /// A sample could not be decoded. Cannot happen for IEEE-754 input.
    #[error("failed to decode sample at byte offset {offset}")]
    Decode { offset: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
