//! Subscription schema migration.
//!
//! Creates plan rows, subscriptions, per-account feature overrides, and the
//! minimal properties table counted against plan limits.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: ENUMS
        // ============================================================
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: PLANS & SUBSCRIPTIONS
        // ============================================================
        db.execute_unprepared(SUBSCRIPTION_PLANS_SQL).await?;
        db.execute_unprepared(SUBSCRIPTIONS_SQL).await?;
        db.execute_unprepared(ENTITLEMENT_OVERRIDES_SQL).await?;

        // ============================================================
        // PART 3: PROPERTIES
        // ============================================================
        db.execute_unprepared(PROPERTIES_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
-- Subscription status
CREATE TYPE subscription_status AS ENUM (
    'active',
    'inactive',
    'cancelled',
    'past_due'
);
";

const SUBSCRIPTION_PLANS_SQL: &str = r"
CREATE TABLE subscription_plans (
    code VARCHAR(32) PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    price_minor_units BIGINT NOT NULL DEFAULT 0,
    -- NULL means unlimited
    property_limit INTEGER,
    ai_enabled BOOLEAN NOT NULL DEFAULT false,
    features JSONB NOT NULL DEFAULT '[]'::jsonb,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_price_non_negative CHECK (price_minor_units >= 0),
    CONSTRAINT chk_property_limit_positive CHECK (property_limit IS NULL OR property_limit > 0),
    CONSTRAINT chk_features_array CHECK (jsonb_typeof(features) = 'array')
);
";

const SUBSCRIPTIONS_SQL: &str = r"
CREATE TABLE subscriptions (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    account_id UUID NOT NULL,
    plan_code VARCHAR(32) NOT NULL REFERENCES subscription_plans(code),
    status subscription_status NOT NULL DEFAULT 'active',
    current_period_start TIMESTAMPTZ NOT NULL,
    current_period_end TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_period_order CHECK (current_period_end > current_period_start)
);

-- Authoritative subscription lookup (latest active row per account)
CREATE INDEX idx_subscriptions_account_active
    ON subscriptions(account_id, created_at DESC) WHERE status = 'active';
";

const ENTITLEMENT_OVERRIDES_SQL: &str = r"
CREATE TABLE entitlement_overrides (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    account_id UUID NOT NULL,
    feature_key VARCHAR(64) NOT NULL,
    enabled BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT uq_override_account_feature UNIQUE (account_id, feature_key)
);
";

const PROPERTIES_SQL: &str = r"
CREATE TABLE properties (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    owner_id UUID NOT NULL,
    name VARCHAR(255) NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

-- Plan limit counting
CREATE INDEX idx_properties_owner_active ON properties(owner_id) WHERE is_active;
";

const DROP_SQL: &str = r"
DROP TABLE IF EXISTS properties CASCADE;
DROP TABLE IF EXISTS entitlement_overrides CASCADE;
DROP TABLE IF EXISTS subscriptions CASCADE;
DROP TABLE IF EXISTS subscription_plans CASCADE;
DROP TYPE IF EXISTS subscription_status;
";
