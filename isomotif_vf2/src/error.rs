//! Error types for the isomorphism search.

use thiserror::Error;

/// Errors that can end a search before it reaches a verdict.
///
/// A structural non-match is not an error: it is reported as `Ok(None)` by
/// [`crate::Vf2Tester::try_find_isomorphism`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The configured node-visit budget ran out.
    #[error("Search abandoned after visiting {limit} states (call limit reached)")]
    CallLimitExceeded {
        /// The budget that was exhausted.
        limit: usize,
    },
}

impl SearchError {
    /// Create a call limit error.
    pub const fn call_limit(limit: usize) -> Self {
        Self::CallLimitExceeded { limit }
    }
}
