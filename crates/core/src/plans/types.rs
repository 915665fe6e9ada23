//! Plan data types.

use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use super::tier::Tier;

/// Maximum number of active properties a plan allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyLimit {
    /// At most this many active properties.
    Limited(u32),
    /// No limit.
    Unlimited,
}

impl PropertyLimit {
    /// Returns true if one more property fits next to `current` ones.
    #[must_use]
    pub fn allows_another(self, current: u64) -> bool {
        match self {
            Self::Limited(max) => current < u64::from(max),
            Self::Unlimited => true,
        }
    }

    /// Builds a limit from a nullable column value (`None` means unlimited).
    #[must_use]
    pub fn from_option(limit: Option<u32>) -> Self {
        limit.map_or(Self::Unlimited, Self::Limited)
    }

    /// The numeric limit, `None` when unlimited.
    #[must_use]
    pub const fn as_option(self) -> Option<u32> {
        match self {
            Self::Limited(max) => Some(max),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for PropertyLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limited(max) => write!(f, "{max}"),
            Self::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Serializes as a number, or as the string `"unlimited"`.
impl Serialize for PropertyLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Limited(max) => serializer.serialize_u32(*max),
            Self::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

/// A plan in the static catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanDefinition {
    /// Tier this plan occupies. The plan code is the tier code.
    pub tier: Tier,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Price per billing period in minor currency units (fillér).
    pub price_minor_units: u64,
    /// Active property allowance.
    pub property_limit: PropertyLimit,
    /// Whether AI features are enabled.
    pub ai_enabled: bool,
    /// Feature keys granted unconditionally.
    pub features: BTreeSet<String>,
}

impl PlanDefinition {
    /// Creates a plan definition.
    #[must_use]
    pub fn new(
        tier: Tier,
        name: impl Into<String>,
        description: impl Into<String>,
        price_minor_units: u64,
        property_limit: PropertyLimit,
        ai_enabled: bool,
        features: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            tier,
            name: name.into(),
            description: description.into(),
            price_minor_units,
            property_limit,
            ai_enabled,
            features: features.into_iter().map(Into::into).collect(),
        }
    }

    /// The plan code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.tier.as_str()
    }

    /// Returns true if the plan grants the feature.
    #[must_use]
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}
