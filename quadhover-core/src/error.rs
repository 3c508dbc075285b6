//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
///
/// All variants except the record errors are violations of the caller
/// contract. They are rejected at construction or at the entry of
/// `reset()`/`step()`, never in the middle of a computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoverError {
    /// An operation was invoked in the wrong phase of the episode,
    /// e.g. `step()` before `reset()`.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A vector does not have the length the environment was configured for.
    #[error("Shape mismatch of {what}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// The name of the offending quantity.
        what: String,

        /// Expected length.
        expected: usize,

        /// Actual length.
        actual: usize,
    },

    /// A configuration value is outside of its valid domain.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}

impl HoverError {
    /// Shorthand for [`HoverError::ShapeMismatch`].
    pub fn shape_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }
}
