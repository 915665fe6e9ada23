//! The static plan catalog.

use std::collections::BTreeSet;

use super::error::PlanError;
use super::tier::Tier;
use super::types::{PlanDefinition, PropertyLimit};

/// Tier assumed for features missing from every plan's feature set.
pub const DEFAULT_REQUIRED_TIER: Tier = Tier::Starter;

/// Immutable, validated list of plan definitions, one per tier, in tier order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCatalog {
    plans: Vec<PlanDefinition>,
}

impl PlanCatalog {
    /// Builds a catalog from plan definitions in any order.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::InvalidCatalog` if a tier is missing or duplicated,
    /// a property limit is zero, or a feature granted at some tier is missing
    /// from a higher tier.
    pub fn new(mut plans: Vec<PlanDefinition>) -> Result<Self, PlanError> {
        plans.sort_by_key(|plan| plan.tier);

        if plans.len() != Tier::ALL.len() {
            return Err(PlanError::invalid_catalog(format!(
                "expected {} plans, got {}",
                Tier::ALL.len(),
                plans.len()
            )));
        }

        for (plan, tier) in plans.iter().zip(Tier::ALL) {
            if plan.tier != tier {
                return Err(PlanError::invalid_catalog(format!(
                    "missing or duplicated plan for tier {tier}"
                )));
            }
            if plan.property_limit == PropertyLimit::Limited(0) {
                return Err(PlanError::invalid_catalog(format!(
                    "plan {tier} has a zero property limit"
                )));
            }
        }

        for pair in plans.windows(2) {
            let (lower, upper) = (&pair[0], &pair[1]);
            if let Some(missing) = lower.features.difference(&upper.features).next() {
                return Err(PlanError::invalid_catalog(format!(
                    "feature {missing} granted by {} but not by {}",
                    lower.tier, upper.tier
                )));
            }
        }

        Ok(Self { plans })
    }

    /// The built-in catalog.
    #[must_use]
    pub fn standard() -> Self {
        const FREE: &[&str] = &["property_management", "tenant_management", "basic_invoicing"];
        const STARTER: &[&str] = &[
            "finance_reports",
            "document_storage",
            "email_reminders",
            "tenant_portal",
        ];
        const PRO: &[&str] = &["ai_assistant", "pro_analytics", "bulk_invoicing", "data_export"];
        const UNLIMITED: &[&str] = &["priority_support", "api_access"];

        fn cumulative(levels: &[&[&str]]) -> BTreeSet<String> {
            levels
                .iter()
                .flat_map(|level| level.iter().map(|f| (*f).to_string()))
                .collect()
        }

        let plans = vec![
            PlanDefinition::new(
                Tier::Free,
                "Ingyenes",
                "Egy ingatlan kezelése díjmentesen",
                0,
                PropertyLimit::Limited(1),
                false,
                cumulative(&[FREE]),
            ),
            PlanDefinition::new(
                Tier::Starter,
                "Starter",
                "Kis portfóliók kezelése pénzügyi riportokkal",
                499_000,
                PropertyLimit::Limited(3),
                false,
                cumulative(&[FREE, STARTER]),
            ),
            PlanDefinition::new(
                Tier::Pro,
                "Pro",
                "AI asszisztens és haladó elemzések",
                999_000,
                PropertyLimit::Limited(10),
                true,
                cumulative(&[FREE, STARTER, PRO]),
            ),
            PlanDefinition::new(
                Tier::Unlimited,
                "Unlimited",
                "Korlátlan ingatlan, kiemelt támogatás",
                1_999_000,
                PropertyLimit::Unlimited,
                true,
                cumulative(&[FREE, STARTER, PRO, UNLIMITED]),
            ),
        ];

        Self { plans }
    }

    /// All plans in ascending tier order.
    #[must_use]
    pub fn plans(&self) -> &[PlanDefinition] {
        &self.plans
    }

    /// The plan occupying `tier`.
    #[must_use]
    pub fn plan(&self, tier: Tier) -> &PlanDefinition {
        &self.plans[tier.index()]
    }

    /// The lowest-tier plan.
    #[must_use]
    pub fn free(&self) -> &PlanDefinition {
        self.plan(Tier::Free)
    }

    /// Looks up a plan by exact code.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::NotFound` if the code is not in the catalog.
    pub fn plan_by_code(&self, code: &str) -> Result<&PlanDefinition, PlanError> {
        Tier::parse(code)
            .map(|tier| self.plan(tier))
            .ok_or_else(|| PlanError::not_found(code))
    }

    /// Looks up a plan by code, falling back to the free plan when the code is
    /// absent or unknown.
    #[must_use]
    pub fn plan_by_code_or_default(&self, code: Option<&str>) -> &PlanDefinition {
        code.and_then(|code| self.plan_by_code(code).ok())
            .unwrap_or_else(|| self.free())
    }

    /// Plans strictly above `code`, ascending. Empty for the top tier or an
    /// unknown code.
    #[must_use]
    pub fn next_tiers(&self, code: &str) -> &[PlanDefinition] {
        match Tier::parse(code) {
            Some(tier) => &self.plans[tier.index() + 1..],
            None => &[],
        }
    }

    /// Returns true if the static feature set of `tier` contains `feature`.
    #[must_use]
    pub fn tier_grants(&self, tier: Tier, feature: &str) -> bool {
        self.plan(tier).has_feature(feature)
    }

    /// Lowest tier whose feature set contains `feature`, or
    /// [`DEFAULT_REQUIRED_TIER`] for unlisted features.
    #[must_use]
    pub fn required_tier(&self, feature: &str) -> Tier {
        self.plans
            .iter()
            .find(|plan| plan.has_feature(feature))
            .map_or(DEFAULT_REQUIRED_TIER, |plan| plan.tier)
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
