//! Error types for the position engine
//!
//! Every failure is local and synchronous: there is no I/O behind any of
//! these, so callers decide between surfacing the error (a 400-equivalent
//! for bad boundaries) and falling back to a safe default key.

use thiserror::Error;

/// Result type alias using [`PositionError`]
pub type Result<T> = std::result::Result<T, PositionError>;

/// Errors produced by position generation and bulk operations
///
/// The validator deliberately never returns these: a malformed or conflicting
/// client key is repaired, not rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// `before` must sort strictly below `after` for between-generation
    #[error("invalid boundary order: {before:?} must sort strictly below {after:?}")]
    InvalidOrder { before: String, after: String },

    /// The boundary key sits at the alphabet minimum; nothing sorts below it
    #[error("cannot generate a position before {0:?}: key is at the alphabet minimum")]
    CannotGenerateBefore(String),

    /// Declared for API symmetry; generating after a key always succeeds
    /// because keys grow in length instead of overflowing
    #[error("cannot generate a position after {0:?}")]
    CannotGenerateAfter(String),

    /// Batch generation needs a positive count
    #[error("batch size must be positive, got {0}")]
    InvalidCount(usize),

    /// A supplied key is empty or uses symbols outside the alphabet
    #[error("malformed position key {0:?}")]
    InvalidKey(String),

    /// A key sequence is not strictly increasing at `index`
    #[error("keys out of order at index {index}: {previous:?} >= {current:?}")]
    OutOfSequence {
        index: usize,
        previous: String,
        current: String,
    },

    /// Two items in a rebalance snapshot share the same id
    #[error("duplicate item id {0:?} in rebalance input")]
    DuplicateItem(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PositionError::InvalidOrder {
            before: "b".to_string(),
            after: "a".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid boundary order: \"b\" must sort strictly below \"a\""
        );

        let err = PositionError::InvalidCount(0);
        assert_eq!(err.to_string(), "batch size must be positive, got 0");
    }

    #[test]
    fn test_error_equality_for_assertions() {
        assert_eq!(
            PositionError::CannotGenerateBefore("0".to_string()),
            PositionError::CannotGenerateBefore("0".to_string())
        );
        assert_ne!(
            PositionError::CannotGenerateBefore("0".to_string()),
            PositionError::CannotGenerateAfter("0".to_string())
        );
    }
}
