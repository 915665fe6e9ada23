//! Property counting for plan limits.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use berlo_core::entitlement::{ResourceCounter, StoreError};
use berlo_shared::types::AccountId;

use super::subscription::store_error;
use crate::entities::properties;

/// Repository for property reads used by entitlement checks.
#[derive(Debug, Clone)]
pub struct PropertyRepository {
    db: DatabaseConnection,
}

impl PropertyRepository {
    /// Creates a new property repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceCounter for PropertyRepository {
    async fn count_active_properties(&self, account_id: AccountId) -> Result<u64, StoreError> {
        properties::Entity::find()
            .filter(properties::Column::OwnerId.eq(account_id.into_inner()))
            .filter(properties::Column::IsActive.eq(true))
            .count(&self.db)
            .await
            .map_err(store_error)
    }
}
