//! Subscription plans and the static plan catalog.
//!
//! The catalog is an immutable value built once and injected wherever plan
//! lookups are needed. Tiers are strictly ordered
//! `free < starter < pro < unlimited` and every feature granted at a tier is
//! also granted at every tier above it.

pub mod catalog;
pub mod error;
pub mod format;
pub mod tier;
pub mod types;

#[cfg(test)]
mod tests;

pub use catalog::PlanCatalog;
pub use error::PlanError;
pub use format::{Locale, format_ai_status, format_price, format_property_limit};
pub use tier::Tier;
pub use types::{PlanDefinition, PropertyLimit};
