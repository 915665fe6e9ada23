//! Entitlement data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use berlo_shared::types::{AccountId, SubscriptionId};

use crate::plans::{PlanDefinition, PropertyLimit, Tier};

/// Subscription status.
///
/// Transitions are owned by the billing integration, never by the resolver:
/// - Active → Cancelled (user or admin cancels)
/// - Active → PastDue (billing signal)
/// - PastDue → Active (payment recovered)
/// - PastDue → Cancelled (grace period exhausted)
/// - any → Inactive (administrative deactivation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Counts toward entitlements.
    Active,
    /// Administratively deactivated.
    Inactive,
    /// Cancelled by the user or an admin.
    Cancelled,
    /// Payment failed, awaiting recovery.
    PastDue,
}

impl SubscriptionStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Cancelled => "cancelled",
            Self::PastDue => "past_due",
        }
    }

    /// Parses a status from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "inactive" => Some(Self::Inactive),
            "cancelled" => Some(Self::Cancelled),
            "past_due" => Some(Self::PastDue),
            _ => None,
        }
    }

    /// Returns true if the status counts toward entitlements.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns true if the billing integration may move from `self` to `next`.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (*self, next),
            (Self::Active, Self::Cancelled | Self::PastDue)
                | (Self::PastDue, Self::Active | Self::Cancelled)
                | (Self::Active | Self::Cancelled | Self::PastDue, Self::Inactive)
        )
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plan row as stored next to a subscription.
///
/// The stored row may diverge from the static catalog: its `features` list
/// extends the tier defaults, and its code may be one the catalog no longer
/// knows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanRecord {
    /// Plan code.
    pub code: String,
    /// Active property allowance.
    pub property_limit: PropertyLimit,
    /// Whether AI features are enabled.
    pub ai_enabled: bool,
    /// Extra feature keys granted on top of the tier defaults.
    pub features: Vec<String>,
}

impl PlanRecord {
    /// Tier of the stored code, if the catalog knows it.
    #[must_use]
    pub fn tier(&self) -> Option<Tier> {
        Tier::parse(&self.code)
    }
}

impl From<&PlanDefinition> for PlanRecord {
    fn from(plan: &PlanDefinition) -> Self {
        Self {
            code: plan.code().to_string(),
            property_limit: plan.property_limit,
            ai_enabled: plan.ai_enabled,
            features: plan.features.iter().cloned().collect(),
        }
    }
}

/// An account's subscription joined with its plan row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    /// Subscription ID.
    pub id: SubscriptionId,
    /// Owning account.
    pub account_id: AccountId,
    /// The subscribed plan.
    pub plan: PlanRecord,
    /// Current status.
    pub status: SubscriptionStatus,
    /// Start of the current billing period.
    pub current_period_start: DateTime<Utc>,
    /// End of the current billing period.
    pub current_period_end: DateTime<Utc>,
    /// Creation timestamp; the latest active row is authoritative.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubscription {
    /// Owning account.
    pub account_id: AccountId,
    /// Plan code.
    pub plan_code: String,
    /// Initial status.
    pub status: SubscriptionStatus,
    /// Start of the first billing period.
    pub current_period_start: DateTime<Utc>,
    /// End of the first billing period.
    pub current_period_end: DateTime<Utc>,
}

/// Property usage against the plan allowance. Computed fresh on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanUsage {
    /// Active properties owned by the account.
    pub current_properties: u64,
    /// Allowance of the current plan.
    pub property_limit: PropertyLimit,
    /// Whether another property may be added.
    pub can_add_property: bool,
    /// Whether an upgrade is needed to add another property.
    pub upgrade_required: bool,
    /// Next tier up, when an upgrade is required and one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_plan: Option<Tier>,
}

/// Outcome of a feature check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitlementCheck {
    /// Whether the account may use the feature.
    pub has_access: bool,
    /// Minimum tier that would grant access, when denied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_required: Option<Tier>,
    /// The feature key that was checked.
    pub feature: String,
}

impl EntitlementCheck {
    /// Access granted.
    #[must_use]
    pub fn granted(feature: impl Into<String>) -> Self {
        Self {
            has_access: true,
            plan_required: None,
            feature: feature.into(),
        }
    }

    /// Access denied; `plan_required` is the tier to upgrade to.
    #[must_use]
    pub fn denied(feature: impl Into<String>, plan_required: Tier) -> Self {
        Self {
            has_access: false,
            plan_required: Some(plan_required),
            feature: feature.into(),
        }
    }
}

/// Direction of a plan change relative to the previous plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanChangeDirection {
    /// Moved to a higher tier, or subscribed for the first time.
    Upgrade,
    /// Moved to a lower tier.
    Downgrade,
    /// Same tier as before.
    Unchanged,
}

impl PlanChangeDirection {
    /// Compares the previous tier (if recognizable) with the new one.
    #[must_use]
    pub fn between(from: Option<Tier>, to: Tier) -> Self {
        match from.map(|from| from.cmp(&to)) {
            None | Some(Ordering::Less) => Self::Upgrade,
            Some(Ordering::Greater) => Self::Downgrade,
            Some(Ordering::Equal) => Self::Unchanged,
        }
    }
}

/// Result of a successful plan change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangePlanOutcome {
    /// The created or updated subscription.
    pub subscription_id: SubscriptionId,
    /// True if a new subscription was created.
    pub created: bool,
    /// Plan code the subscription pointed at before the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_plan: Option<String>,
    /// Direction of the change.
    pub direction: PlanChangeDirection,
}
