//! Core business logic for Berlo.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Plan definitions and entitlement rules live here; persistence is reached
//! only through the store traits in [`entitlement::store`].
//!
//! # Modules
//!
//! - `plans` - Static plan catalog, tiers, and display formatting
//! - `entitlement` - Property limits, feature gating, and plan changes

pub mod entitlement;
pub mod plans;

pub use entitlement::{EntitlementError, EntitlementResolver};
pub use plans::{PlanCatalog, Tier};
