//! Property-based tests for the plan catalog.

use proptest::prelude::*;

use super::catalog::PlanCatalog;
use super::format::{Locale, format_price};
use super::tier::Tier;
use super::types::PropertyLimit;

/// Every feature granted at a tier is granted at every higher tier.
#[test]
fn test_standard_feature_table_is_monotonic() {
    let catalog = PlanCatalog::standard();
    for (i, lower) in catalog.plans().iter().enumerate() {
        for upper in &catalog.plans()[i + 1..] {
            for feature in &lower.features {
                assert!(
                    upper.has_feature(feature),
                    "{feature} granted by {} but not by {}",
                    lower.tier,
                    upper.tier
                );
            }
        }
    }
}

#[test]
fn test_plan_by_code_returns_matching_code() {
    let catalog = PlanCatalog::standard();
    for tier in Tier::ALL {
        let plan = catalog.plan_by_code(tier.as_str()).unwrap();
        assert_eq!(plan.code(), tier.as_str());
    }
}

#[test]
fn test_required_tier_grants_the_feature() {
    let catalog = PlanCatalog::standard();
    for plan in catalog.plans() {
        for feature in &plan.features {
            let required = catalog.required_tier(feature);
            assert!(required <= plan.tier);
            assert!(catalog.tier_grants(required, feature));
        }
    }
}

fn any_tier() -> impl Strategy<Value = Tier> {
    prop::sample::select(Tier::ALL.to_vec())
}

proptest! {
    /// Unknown codes always resolve to the free plan.
    #[test]
    fn test_unknown_code_defaults_to_free(code in "[a-z_]{0,12}") {
        prop_assume!(Tier::parse(&code).is_none());
        let catalog = PlanCatalog::standard();
        prop_assert_eq!(catalog.plan_by_code_or_default(Some(&code)).tier, Tier::Free);
        prop_assert!(catalog.next_tiers(&code).is_empty());
    }

    /// Upgrade candidates are strictly above the current tier, ascending.
    #[test]
    fn test_next_tiers_strictly_above(tier in any_tier()) {
        let catalog = PlanCatalog::standard();
        let next = catalog.next_tiers(tier.as_str());
        prop_assert_eq!(next.len(), Tier::ALL.len() - tier.index() - 1);
        prop_assert!(next.iter().all(|plan| plan.tier > tier));
        prop_assert!(next.windows(2).all(|w| w[0].tier < w[1].tier));
        prop_assert_eq!(next.first().map(|plan| plan.tier), tier.next());
    }

    /// A limited allowance admits exactly the counts below the limit.
    #[test]
    fn test_limited_allowance(max in 1u32..1000, current in 0u64..2000) {
        prop_assert_eq!(
            PropertyLimit::Limited(max).allows_another(current),
            current < u64::from(max)
        );
    }

    /// Non-zero prices never render as the free label.
    #[test]
    fn test_paid_price_is_never_free_label(minor in 1u64..10_000_000_000) {
        let formatted = format_price(minor, Locale::Hu);
        prop_assert!(formatted.ends_with(" Ft/hó"));
        prop_assert_ne!(formatted, "Ingyenes");
    }
}
