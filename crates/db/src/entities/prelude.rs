//! Entity re-exports.

pub use super::entitlement_overrides::Entity as EntitlementOverrides;
pub use super::properties::Entity as Properties;
pub use super::subscription_plans::Entity as SubscriptionPlans;
pub use super::subscriptions::Entity as Subscriptions;
