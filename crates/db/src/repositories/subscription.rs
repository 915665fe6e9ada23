//! Subscription store backed by `PostgreSQL`.
//!
//! Implements the resolver's [`SubscriptionStore`] contract over the
//! `subscriptions`, `subscription_plans`, and `entitlement_overrides` tables.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, prelude::DateTimeWithTimeZone, sea_query::Expr,
};
use tracing::debug;
use uuid::Uuid;

use berlo_core::entitlement::{
    NewSubscription, PlanRecord, StoreError, Subscription, SubscriptionStatus, SubscriptionStore,
};
use berlo_core::plans::PropertyLimit;
use berlo_shared::types::{AccountId, SubscriptionId};

use crate::entities::{
    entitlement_overrides, sea_orm_active_enums::SubscriptionStatus as DbSubscriptionStatus,
    subscription_plans, subscriptions,
};

/// Repository for subscriptions and feature overrides.
#[derive(Debug, Clone)]
pub struct SubscriptionRepository {
    db: DatabaseConnection,
}

impl SubscriptionRepository {
    /// Creates a new subscription repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Latest active subscription row for the account, with its plan row.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub async fn find_active_with_plan(
        &self,
        account_id: Uuid,
    ) -> Result<Option<(subscriptions::Model, Option<subscription_plans::Model>)>, DbErr> {
        let subscription = subscriptions::Entity::find()
            .filter(subscriptions::Column::AccountId.eq(account_id))
            .filter(subscriptions::Column::Status.eq(DbSubscriptionStatus::Active))
            .order_by_desc(subscriptions::Column::CreatedAt)
            .one(&self.db)
            .await?;

        let Some(subscription) = subscription else {
            return Ok(None);
        };

        let plan = subscription_plans::Entity::find_by_id(subscription.plan_code.clone())
            .one(&self.db)
            .await?;

        Ok(Some((subscription, plan)))
    }
}

#[async_trait]
impl SubscriptionStore for SubscriptionRepository {
    async fn find_active_subscription(
        &self,
        account_id: AccountId,
    ) -> Result<Option<Subscription>, StoreError> {
        let found = self
            .find_active_with_plan(account_id.into_inner())
            .await
            .map_err(store_error)?;

        let Some((subscription, plan)) = found else {
            return Ok(None);
        };

        let plan = plan.ok_or_else(|| {
            StoreError::unavailable(format!(
                "subscription {} references missing plan {}",
                subscription.id, subscription.plan_code
            ))
        })?;

        Ok(Some(to_subscription(subscription, plan)?))
    }

    async fn find_override(
        &self,
        account_id: AccountId,
        feature_key: &str,
    ) -> Result<Option<bool>, StoreError> {
        let row = entitlement_overrides::Entity::find()
            .filter(entitlement_overrides::Column::AccountId.eq(account_id.into_inner()))
            .filter(entitlement_overrides::Column::FeatureKey.eq(feature_key))
            .one(&self.db)
            .await
            .map_err(store_error)?;

        Ok(row.map(|row| row.enabled))
    }

    async fn insert_subscription(
        &self,
        record: NewSubscription,
    ) -> Result<SubscriptionId, StoreError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let model = subscriptions::ActiveModel {
            id: Set(Uuid::now_v7()),
            account_id: Set(record.account_id.into_inner()),
            plan_code: Set(record.plan_code),
            status: Set(to_db_status(record.status)),
            current_period_start: Set(record.current_period_start.into()),
            current_period_end: Set(record.current_period_end.into()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&self.db).await.map_err(store_error)?;
        Ok(SubscriptionId::from_uuid(inserted.id))
    }

    async fn update_subscription_plan(
        &self,
        subscription_id: SubscriptionId,
        plan_code: &str,
    ) -> Result<(), StoreError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let result = subscriptions::Entity::update_many()
            .col_expr(subscriptions::Column::PlanCode, Expr::value(plan_code))
            .col_expr(subscriptions::Column::UpdatedAt, Expr::value(now))
            .filter(subscriptions::Column::Id.eq(subscription_id.into_inner()))
            .exec(&self.db)
            .await
            .map_err(store_error)?;

        if result.rows_affected == 0 {
            return Err(StoreError::unavailable(format!(
                "subscription {subscription_id} not found"
            )));
        }

        Ok(())
    }
}

pub(crate) fn store_error(err: DbErr) -> StoreError {
    debug!(error = %err, "subscription store query failed");
    StoreError::unavailable(err.to_string())
}

fn to_subscription(
    subscription: subscriptions::Model,
    plan: subscription_plans::Model,
) -> Result<Subscription, StoreError> {
    Ok(Subscription {
        id: SubscriptionId::from_uuid(subscription.id),
        account_id: AccountId::from_uuid(subscription.account_id),
        plan: to_plan_record(plan)?,
        status: from_db_status(subscription.status),
        current_period_start: subscription.current_period_start.with_timezone(&Utc),
        current_period_end: subscription.current_period_end.with_timezone(&Utc),
        created_at: subscription.created_at.with_timezone(&Utc),
    })
}

/// Converts a plan row into the resolver's view of it.
///
/// # Errors
///
/// Returns an error if the row holds a negative limit or a malformed feature list.
pub fn to_plan_record(plan: subscription_plans::Model) -> Result<PlanRecord, StoreError> {
    let property_limit = plan
        .property_limit
        .map(u32::try_from)
        .transpose()
        .map(PropertyLimit::from_option)
        .map_err(|_| {
            StoreError::unavailable(format!(
                "plan {} has invalid property limit {:?}",
                plan.code, plan.property_limit
            ))
        })?;

    let features: Vec<String> = serde_json::from_value(plan.features).map_err(|e| {
        StoreError::unavailable(format!("plan {} has malformed features: {e}", plan.code))
    })?;

    Ok(PlanRecord {
        code: plan.code,
        property_limit,
        ai_enabled: plan.ai_enabled,
        features,
    })
}

const fn from_db_status(status: DbSubscriptionStatus) -> SubscriptionStatus {
    match status {
        DbSubscriptionStatus::Active => SubscriptionStatus::Active,
        DbSubscriptionStatus::Inactive => SubscriptionStatus::Inactive,
        DbSubscriptionStatus::Cancelled => SubscriptionStatus::Cancelled,
        DbSubscriptionStatus::PastDue => SubscriptionStatus::PastDue,
    }
}

const fn to_db_status(status: SubscriptionStatus) -> DbSubscriptionStatus {
    match status {
        SubscriptionStatus::Active => DbSubscriptionStatus::Active,
        SubscriptionStatus::Inactive => DbSubscriptionStatus::Inactive,
        SubscriptionStatus::Cancelled => DbSubscriptionStatus::Cancelled,
        SubscriptionStatus::PastDue => DbSubscriptionStatus::PastDue,
    }
}
