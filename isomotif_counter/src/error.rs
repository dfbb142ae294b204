use thiserror::Error;

/// Errors raised by [`crate::Counter`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CounterError {
    /// An occurrence count below one was supplied.
    #[error("Count must be positive: {0}")]
    InvalidCount(usize),
}
