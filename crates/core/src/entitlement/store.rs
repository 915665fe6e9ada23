//! Data-access contracts consumed by the resolver.
//!
//! Implementations live outside this crate (see `berlo-db`), plus an
//! in-memory one for tests and local development.

use async_trait::async_trait;

use berlo_shared::types::{AccountId, SubscriptionId};

use super::error::StoreError;
use super::types::{NewSubscription, Subscription};

/// Subscription and override persistence.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// The account's active subscription with its plan row.
    ///
    /// When several active rows exist, the most recently created one is
    /// returned.
    async fn find_active_subscription(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Subscription>, StoreError>;

    /// Explicit per-feature override for the account, if one is recorded.
    async fn find_override(
        &self,
        account_id: AccountId,
        feature_key: &str,
    ) -> Result<Option<bool>, StoreError>;

    /// Persist a new subscription and return its ID.
    async fn insert_subscription(
        &self,
        record: NewSubscription,
    ) -> Result<SubscriptionId, StoreError>;

    /// Point an existing subscription at another plan, keeping its period.
    async fn update_subscription_plan(
        &self,
        subscription_id: SubscriptionId,
        plan_code: &str,
    ) -> Result<(), StoreError>;
}

/// Counts resources subject to plan limits.
#[async_trait]
pub trait ResourceCounter: Send + Sync {
    /// Number of the account's properties with `is_active = true`.
    async fn count_active_properties(&self, account_id: AccountId) -> Result<u64, StoreError>;
}

/// Picks the authoritative subscription among `rows`: the active one with the
/// latest `created_at`.
#[must_use]
pub fn select_authoritative<I>(rows: I) -> Option<Subscription>
where
    I: IntoIterator<Item = Subscription>,
{
    rows.into_iter()
        .filter(|sub| sub.status.is_active())
        .max_by_key(|sub| sub.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entitlement::types::{PlanRecord, SubscriptionStatus};
    use crate::plans::PropertyLimit;
    use chrono::{Duration, Utc};

    fn row(code: &str, status: SubscriptionStatus, age_days: i64) -> Subscription {
        let created_at = Utc::now() - Duration::days(age_days);
        Subscription {
            id: SubscriptionId::new(),
            account_id: AccountId::new(),
            plan: PlanRecord {
                code: code.to_string(),
                property_limit: PropertyLimit::Limited(3),
                ai_enabled: false,
                features: Vec::new(),
            },
            status,
            current_period_start: created_at,
            current_period_end: created_at + Duration::days(30),
            created_at,
        }
    }

    #[test]
    fn test_select_latest_active() {
        let rows = vec![
            row("free", SubscriptionStatus::Active, 20),
            row("pro", SubscriptionStatus::Active, 2),
            row("starter", SubscriptionStatus::Active, 10),
        ];
        let selected = select_authoritative(rows).unwrap();
        assert_eq!(selected.plan.code, "pro");
    }

    #[test]
    fn test_select_ignores_inactive_rows() {
        let rows = vec![
            row("starter", SubscriptionStatus::Active, 30),
            row("unlimited", SubscriptionStatus::Cancelled, 1),
            row("pro", SubscriptionStatus::PastDue, 2),
        ];
        let selected = select_authoritative(rows).unwrap();
        assert_eq!(selected.plan.code, "starter");
    }

    #[test]
    fn test_select_none_without_active_rows() {
        let rows = vec![row("pro", SubscriptionStatus::Inactive, 1)];
        assert!(select_authoritative(rows).is_none());
        assert!(select_authoritative(Vec::new()).is_none());
    }
}
