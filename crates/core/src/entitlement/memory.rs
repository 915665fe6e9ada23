//! In-memory store for tests and local development.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;

use berlo_shared::types::{AccountId, SubscriptionId};

use super::error::StoreError;
use super::store::{ResourceCounter, SubscriptionStore, select_authoritative};
use super::types::{NewSubscription, PlanRecord, Subscription};
use crate::plans::PlanCatalog;

/// In-memory implementation of both [`SubscriptionStore`] and
/// [`ResourceCounter`].
///
/// Clones share the same data, so one instance can serve as both the store and
/// the counter of a resolver.
#[derive(Debug, Default, Clone)]
pub struct InMemorySubscriptionStore {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    plans: RwLock<HashMap<String, PlanRecord>>,
    subscriptions: RwLock<Vec<Subscription>>,
    overrides: RwLock<HashMap<(AccountId, String), bool>>,
    properties: RwLock<HashMap<AccountId, u64>>,
    writes: AtomicUsize,
    store_down: AtomicBool,
    counter_down: AtomicBool,
}

impl InMemorySubscriptionStore {
    /// Create an empty store with no plan rows.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose plan rows mirror `catalog`.
    #[must_use]
    pub fn with_catalog(catalog: &PlanCatalog) -> Self {
        let store = Self::new();
        for plan in catalog.plans() {
            store.put_plan(PlanRecord::from(plan));
        }
        store
    }

    /// Insert or replace a plan row.
    pub fn put_plan(&self, plan: PlanRecord) {
        self.inner
            .plans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(plan.code.clone(), plan);
    }

    /// Add a subscription row as-is.
    pub fn put_subscription(&self, subscription: Subscription) {
        self.inner
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscription);
    }

    /// Record an explicit feature override.
    pub fn put_override(&self, account_id: AccountId, feature_key: &str, enabled: bool) {
        self.inner
            .overrides
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((account_id, feature_key.to_string()), enabled);
    }

    /// Set the number of active properties owned by the account.
    pub fn set_active_properties(&self, account_id: AccountId, count: u64) {
        self.inner
            .properties
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account_id, count);
    }

    /// Make every subscription store call fail until reset.
    pub fn set_store_unavailable(&self, down: bool) {
        self.inner.store_down.store(down, Ordering::SeqCst);
    }

    /// Make every resource counter call fail until reset.
    pub fn set_counter_unavailable(&self, down: bool) {
        self.inner.counter_down.store(down, Ordering::SeqCst);
    }

    /// Snapshot of all subscription rows.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.inner
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of successful inserts and updates.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.inner.writes.load(Ordering::SeqCst)
    }

    fn check_store(&self) -> Result<(), StoreError> {
        if self.inner.store_down.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory store marked unavailable"));
        }
        Ok(())
    }

    fn plan_row(&self, code: &str) -> Result<PlanRecord, StoreError> {
        self.inner
            .plans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
            .ok_or_else(|| StoreError::unavailable(format!("no plan row for code {code}")))
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn find_active_subscription(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Subscription>, StoreError> {
        self.check_store()?;
        let rows = self
            .inner
            .subscriptions
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(select_authoritative(
            rows.iter()
                .filter(|sub| sub.account_id == account_id)
                .cloned(),
        ))
    }

    async fn find_override(
        &self,
        account_id: AccountId,
        feature_key: &str,
    ) -> Result<Option<bool>, StoreError> {
        self.check_store()?;
        Ok(self
            .inner
            .overrides
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(account_id, feature_key.to_string()))
            .copied())
    }

    async fn insert_subscription(
        &self,
        record: NewSubscription,
    ) -> Result<SubscriptionId, StoreError> {
        self.check_store()?;
        let plan = self.plan_row(&record.plan_code)?;
        let id = SubscriptionId::new();
        self.put_subscription(Subscription {
            id,
            account_id: record.account_id,
            plan,
            status: record.status,
            current_period_start: record.current_period_start,
            current_period_end: record.current_period_end,
            created_at: Utc::now(),
        });
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn update_subscription_plan(
        &self,
        subscription_id: SubscriptionId,
        plan_code: &str,
    ) -> Result<(), StoreError> {
        self.check_store()?;
        let plan = self.plan_row(plan_code)?;
        let mut rows = self
            .inner
            .subscriptions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let row = rows
            .iter_mut()
            .find(|sub| sub.id == subscription_id)
            .ok_or_else(|| {
                StoreError::unavailable(format!("subscription {subscription_id} not found"))
            })?;
        row.plan = plan;
        self.inner.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[async_trait]
impl ResourceCounter for InMemorySubscriptionStore {
    async fn count_active_properties(&self, account_id: AccountId) -> Result<u64, StoreError> {
        if self.inner.counter_down.load(Ordering::SeqCst) {
            return Err(StoreError::unavailable("in-memory counter marked unavailable"));
        }
        Ok(self
            .inner
            .properties
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&account_id)
            .copied()
            .unwrap_or(0))
    }
}
