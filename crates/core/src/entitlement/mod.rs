//! Entitlement resolution.
//!
//! The [`EntitlementResolver`] is the single authority for "can this account
//! do X right now". It reads the account's active subscription from a
//! [`SubscriptionStore`], counts properties through a [`ResourceCounter`] and
//! checks both against an injected [`PlanCatalog`](crate::plans::PlanCatalog).
//!
//! Every query re-fetches from the stores; nothing is cached. Read paths fail
//! closed: a store error yields the same result as having no subscription.

pub mod error;
pub mod memory;
pub mod resolver;
pub mod store;
pub mod types;


pub use error::{EntitlementError, StoreError};
pub use memory::InMemorySubscriptionStore;
pub use resolver::{AI_GATED_FEATURES, BILLING_PERIOD_DAYS, EntitlementResolver};
pub use store::{ResourceCounter, SubscriptionStore, select_authoritative};
pub use types::{
    ChangePlanOutcome, EntitlementCheck, NewSubscription, PlanChangeDirection, PlanRecord,
    PlanUsage, Subscription, SubscriptionStatus,
};
