//! Plan catalog seeder for Berlo.
//!
//! Upserts the four catalog plans into `subscription_plans` so that
//! subscriptions can reference them. Safe to run repeatedly.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use berlo_core::plans::{
    Locale, PlanCatalog, format_ai_status, format_price, format_property_limit,
};
use berlo_db::{PlanRepository, connect};
use berlo_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = connect(&config.database)
        .await
        .context("failed to connect to database")?;
    info!("Connected to database");

    let catalog = PlanCatalog::standard();
    for plan in catalog.plans() {
        info!(
            plan = plan.code(),
            price = %format_price(plan.price_minor_units, Locale::Hu),
            properties = %format_property_limit(plan.property_limit, Locale::Hu),
            ai = %format_ai_status(plan.ai_enabled, Locale::Hu),
            "seeding plan"
        );
    }

    let written = PlanRepository::new(db)
        .sync_catalog(&catalog)
        .await
        .context("failed to write plan catalog")?;

    info!(plans = written, "Seeding complete");
    Ok(())
}
