//! The entitlement resolver.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};

use berlo_shared::types::AccountId;

use super::error::{EntitlementError, StoreError};
use super::store::{ResourceCounter, SubscriptionStore};
use super::types::{
    ChangePlanOutcome, EntitlementCheck, NewSubscription, PlanChangeDirection, PlanRecord,
    PlanUsage, Subscription, SubscriptionStatus,
};
use crate::plans::{PlanCatalog, Tier};

/// Features gated on the plan's AI flag rather than its feature list.
pub const AI_GATED_FEATURES: [&str; 2] = ["ai_assistant", "pro_analytics"];

/// Length of a billing period created by a plan change.
pub const BILLING_PERIOD_DAYS: i64 = 30;

/// Tier required when the account has no usable subscription.
const ENTRY_TIER: Tier = Tier::Starter;

/// Tier required for AI-gated features.
const AI_TIER: Tier = Tier::Pro;

/// Decides what an account may do based on its subscription.
///
/// Generic over the two data-access contracts so the same logic runs against
/// PostgreSQL and the in-memory store.
pub struct EntitlementResolver<S, C> {
    store: S,
    counter: C,
    catalog: Arc<PlanCatalog>,
}

impl<S: SubscriptionStore, C: ResourceCounter> EntitlementResolver<S, C> {
    /// Create a resolver over the given stores and catalog.
    #[must_use]
    pub fn new(store: S, counter: C, catalog: Arc<PlanCatalog>) -> Self {
        Self {
            store,
            counter,
            catalog,
        }
    }

    /// The catalog this resolver checks against.
    #[must_use]
    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// Property usage and upgrade suggestion for the account.
    ///
    /// Never fails: without an active subscription, or when a store call
    /// fails, the account may not add properties and is pointed at the entry
    /// paid tier.
    #[instrument(skip_all, fields(account_id = %account_id))]
    pub async fn get_plan_usage(&self, account_id: AccountId) -> PlanUsage {
        match self.try_plan_usage(account_id).await {
            Ok(Some(usage)) => usage,
            Ok(None) => {
                debug!("no active subscription, property additions blocked");
                self.no_subscription_usage()
            }
            Err(err) => {
                warn!(error = %err, "plan usage lookup failed, failing closed");
                self.no_subscription_usage()
            }
        }
    }

    /// Whether the account may use `feature_key`.
    ///
    /// Resolution order: explicit override, subscription presence, AI gate,
    /// plan features. Store failures deny access.
    #[instrument(skip_all, fields(account_id = %account_id, feature = feature_key))]
    pub async fn check_entitlement(
        &self,
        account_id: AccountId,
        feature_key: &str,
    ) -> EntitlementCheck {
        match self.try_check_entitlement(account_id, feature_key).await {
            Ok(check) => check,
            Err(err) => {
                warn!(error = %err, "entitlement lookup failed, failing closed");
                EntitlementCheck::denied(feature_key, ENTRY_TIER)
            }
        }
    }

    /// Moves the account to `new_plan_code`.
    ///
    /// Creates an active subscription with a fresh 30-day period when the
    /// account has none, otherwise repoints the existing subscription in
    /// place without touching its period.
    ///
    /// # Errors
    ///
    /// Returns `EntitlementError::PlanNotFound` if the code is not in the
    /// catalog (no store call is made), or `EntitlementError::StoreUnavailable`
    /// if a store call fails.
    #[instrument(skip_all, fields(account_id = %account_id, new_plan = new_plan_code))]
    pub async fn change_plan(
        &self,
        account_id: AccountId,
        new_plan_code: &str,
    ) -> Result<ChangePlanOutcome, EntitlementError> {
        let plan = self
            .catalog
            .plan_by_code(new_plan_code)
            .map_err(|_| EntitlementError::PlanNotFound(new_plan_code.to_string()))?;

        let outcome = match self.active_subscription(account_id).await? {
            None => {
                let now = Utc::now();
                let subscription_id = self
                    .store
                    .insert_subscription(NewSubscription {
                        account_id,
                        plan_code: plan.code().to_string(),
                        status: SubscriptionStatus::Active,
                        current_period_start: now,
                        current_period_end: now + Duration::days(BILLING_PERIOD_DAYS),
                    })
                    .await?;

                ChangePlanOutcome {
                    subscription_id,
                    created: true,
                    previous_plan: None,
                    direction: PlanChangeDirection::Upgrade,
                }
            }
            Some(current) => {
                self.store
                    .update_subscription_plan(current.id, plan.code())
                    .await?;

                ChangePlanOutcome {
                    subscription_id: current.id,
                    created: false,
                    direction: PlanChangeDirection::between(current.plan.tier(), plan.tier),
                    previous_plan: Some(current.plan.code),
                }
            }
        };

        info!(
            from = outcome.previous_plan.as_deref().unwrap_or("none"),
            to = plan.code(),
            subscription_id = %outcome.subscription_id,
            created = outcome.created,
            direction = ?outcome.direction,
            "plan changed"
        );

        Ok(outcome)
    }

    async fn active_subscription(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Subscription>, StoreError> {
        let subscription = self.store.find_active_subscription(account_id).await?;
        Ok(subscription.filter(|sub| sub.status.is_active()))
    }

    async fn try_plan_usage(&self, account_id: AccountId) -> Result<Option<PlanUsage>, StoreError> {
        let Some(subscription) = self.active_subscription(account_id).await? else {
            return Ok(None);
        };

        let current_properties = self.counter.count_active_properties(account_id).await?;
        Ok(Some(self.usage_for(&subscription.plan, current_properties)))
    }

    async fn try_check_entitlement(
        &self,
        account_id: AccountId,
        feature_key: &str,
    ) -> Result<EntitlementCheck, StoreError> {
        if self.store.find_override(account_id, feature_key).await? == Some(true) {
            debug!("granted by override");
            return Ok(EntitlementCheck::granted(feature_key));
        }

        let Some(subscription) = self.active_subscription(account_id).await? else {
            debug!("no active subscription, denied");
            return Ok(EntitlementCheck::denied(feature_key, ENTRY_TIER));
        };
        let plan = &subscription.plan;

        if AI_GATED_FEATURES.iter().any(|f| *f == feature_key) {
            return Ok(if plan.ai_enabled {
                EntitlementCheck::granted(feature_key)
            } else {
                EntitlementCheck::denied(feature_key, AI_TIER)
            });
        }

        if self.plan_grants(plan, feature_key) {
            Ok(EntitlementCheck::granted(feature_key))
        } else {
            Ok(EntitlementCheck::denied(
                feature_key,
                self.catalog.required_tier(feature_key),
            ))
        }
    }

    /// Stored feature list and static tier defaults, combined.
    fn plan_grants(&self, plan: &PlanRecord, feature_key: &str) -> bool {
        plan.features.iter().any(|f| f == feature_key)
            || plan
                .tier()
                .is_some_and(|tier| self.catalog.tier_grants(tier, feature_key))
    }

    fn usage_for(&self, plan: &PlanRecord, current_properties: u64) -> PlanUsage {
        let can_add_property = plan.property_limit.allows_another(current_properties);
        let suggested_plan = if can_add_property {
            None
        } else {
            self.catalog.next_tiers(&plan.code).first().map(|next| next.tier)
        };

        PlanUsage {
            current_properties,
            property_limit: plan.property_limit,
            can_add_property,
            upgrade_required: !can_add_property,
            suggested_plan,
        }
    }

    // No subscription is stricter than the free plan: property additions are
    // blocked even though the free tier allows one.
    fn no_subscription_usage(&self) -> PlanUsage {
        PlanUsage {
            current_properties: 0,
            property_limit: self.catalog.free().property_limit,
            can_add_property: false,
            upgrade_required: true,
            suggested_plan: Some(ENTRY_TIER),
        }
    }
}
