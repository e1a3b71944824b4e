//! Error types for lanecap-core.
//!
//! Only *recoverable* configuration problems surface as [`Error`]. Table
//! integrity defects (duplicate keys, unknown operation keys, malformed
//! widths) are programmer errors and panic instead — degrading them to the
//! scalar result would mask real bugs in the tables. The ordinary "no vector
//! instruction exists" outcome is not an error at all; it is the `1` result
//! every caller must expect.

use thiserror::Error;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration source could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] figment::Error),

    /// A feature name in the configuration is not a known CPU feature.
    #[error("unknown CPU feature name: {0}")]
    UnknownFeature(String),

    /// The configured vector capacity is not a power of two.
    #[error("max vector bytes must be a power of two, got {0}")]
    InvalidVectorWidth(usize),
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
