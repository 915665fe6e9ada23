//! Plan catalog error types.

use thiserror::Error;

use berlo_shared::AppError;

/// Plan-related errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// The plan code is not part of the catalog.
    #[error("Plan not found: {0}")]
    NotFound(String),

    /// The plan table violates a catalog invariant.
    #[error("Invalid plan catalog: {0}")]
    InvalidCatalog(String),
}

impl PlanError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound(code.into())
    }

    /// Create an invalid catalog error.
    #[must_use]
    pub fn invalid_catalog(reason: impl Into<String>) -> Self {
        Self::InvalidCatalog(reason.into())
    }
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::NotFound(_) => Self::NotFound(err.to_string()),
            PlanError::InvalidCatalog(_) => Self::Internal(err.to_string()),
        }
    }
}
