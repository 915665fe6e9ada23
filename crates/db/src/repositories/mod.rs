//! Repository abstractions for data access.
//!
//! Repositories implement the entitlement store contracts over `SeaORM`,
//! hiding the query details from the resolver.

pub mod plan;
pub mod property;
pub mod subscription;


pub use plan::PlanRepository;
pub use property::PropertyRepository;
pub use subscription::{SubscriptionRepository, to_plan_record};
