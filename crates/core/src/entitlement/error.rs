//! Entitlement error types.

use thiserror::Error;

use berlo_shared::AppError;

/// Failure reported by a subscription store or resource counter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Create an unavailable error.
    #[must_use]
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Errors surfaced by plan changes.
///
/// Read paths never return these; they fail closed instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntitlementError {
    /// The requested plan code is not in the catalog.
    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    /// The subscription store failed.
    #[error("Subscription store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

impl From<EntitlementError> for AppError {
    fn from(err: EntitlementError) -> Self {
        match err {
            EntitlementError::PlanNotFound(_) => Self::NotFound(err.to_string()),
            EntitlementError::StoreUnavailable(_) => Self::ExternalService(err.to_string()),
        }
    }
}
