//! Plan row synchronization.

use chrono::Utc;
use sea_orm::{
    DatabaseConnection, DbErr, EntityTrait, Set, prelude::DateTimeWithTimeZone,
    sea_query::OnConflict,
};
use serde_json::json;
use tracing::info;

use berlo_core::plans::{PlanCatalog, PlanDefinition};

use crate::entities::subscription_plans;

/// Repository for `subscription_plans` rows.
#[derive(Debug, Clone)]
pub struct PlanRepository {
    db: DatabaseConnection,
}

impl PlanRepository {
    /// Creates a new plan repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts every catalog plan into `subscription_plans`.
    ///
    /// Existing rows keep their `created_at`; all other columns are replaced
    /// with the catalog values. Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn sync_catalog(&self, catalog: &PlanCatalog) -> Result<u64, DbErr> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let rows: Vec<subscription_plans::ActiveModel> = catalog
            .plans()
            .iter()
            .map(|plan| to_active_model(plan, now))
            .collect::<Result<_, _>>()?;

        let written = subscription_plans::Entity::insert_many(rows)
            .on_conflict(
                OnConflict::column(subscription_plans::Column::Code)
                    .update_columns([
                        subscription_plans::Column::Name,
                        subscription_plans::Column::Description,
                        subscription_plans::Column::PriceMinorUnits,
                        subscription_plans::Column::PropertyLimit,
                        subscription_plans::Column::AiEnabled,
                        subscription_plans::Column::Features,
                        subscription_plans::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        info!(plans = written, "plan catalog synchronized");
        Ok(written)
    }
}

fn to_active_model(
    plan: &PlanDefinition,
    now: DateTimeWithTimeZone,
) -> Result<subscription_plans::ActiveModel, DbErr> {
    let price = i64::try_from(plan.price_minor_units)
        .map_err(|_| DbErr::Custom(format!("plan {} price out of range", plan.code())))?;
    let property_limit = plan
        .property_limit
        .as_option()
        .map(i32::try_from)
        .transpose()
        .map_err(|_| DbErr::Custom(format!("plan {} limit out of range", plan.code())))?;

    Ok(subscription_plans::ActiveModel {
        code: Set(plan.code().to_string()),
        name: Set(plan.name.clone()),
        description: Set(plan.description.clone()),
        price_minor_units: Set(price),
        property_limit: Set(property_limit),
        ai_enabled: Set(plan.ai_enabled),
        features: Set(json!(plan.features)),
        created_at: Set(now),
        updated_at: Set(now),
    })
}
