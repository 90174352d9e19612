//! Error types for the `landfall-placement` crate.

use landfall_components::DomainError;

use crate::backend::BackendError;

/// Errors raised while validating, loading, or running a scenario.
#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    /// The backend failed. Backend failures are never retried.
    #[error("backend error: {source}")]
    Backend {
        /// The underlying backend error.
        #[from]
        source: BackendError,
    },

    /// Mutating a rejected marker failed.
    #[error("marker mutation failed: {source}")]
    Domain {
        /// The underlying operator error.
        #[from]
        source: DomainError,
    },

    /// A marker never found an acceptable spot.
    #[error("marker `{name}` was not placed after {attempts} attempts")]
    PlacementFailed {
        /// Object name of the marker at its last attempt.
        name: String,
        /// Attempts made.
        attempts: u32,
    },
}
