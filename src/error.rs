//! Error types for control chart analysis.

use thiserror::Error;

/// Errors raised while computing zones or loading configuration.
///
/// Rule evaluation itself never fails: once a [`ZoneBoundaries`] exists the
/// zones are well defined, so every error surfaces before the first rule runs.
///
/// [`ZoneBoundaries`]: crate::spc::ZoneBoundaries
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpcError {
    /// The measurements cannot support a control chart (too few points,
    /// non-finite values, or an invalid parameter).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The standard deviation is zero, so sigma zones are undefined.
    #[error("Numeric error: {0}")]
    Numeric(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type SpcResult<T> = Result<T, SpcError>;
