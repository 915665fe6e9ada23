//! `SeaORM` entity definitions.

pub mod prelude;

pub mod entitlement_overrides;
pub mod properties;
pub mod sea_orm_active_enums;
pub mod subscription_plans;
pub mod subscriptions;
