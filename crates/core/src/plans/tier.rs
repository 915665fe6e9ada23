//! Plan tiers and their fixed ordering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subscription tier.
///
/// Ordering is positional: `Free < Starter < Pro < Unlimited`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Entry tier, no charge.
    Free,
    /// Entry-level paid tier.
    Starter,
    /// Paid tier with AI features.
    Pro,
    /// Top tier without a property limit.
    Unlimited,
}

impl Tier {
    /// All tiers in ascending order.
    pub const ALL: [Self; 4] = [Self::Free, Self::Starter, Self::Pro, Self::Unlimited];

    /// Returns the plan code for this tier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Unlimited => "unlimited",
        }
    }

    /// Parses a tier from its plan code. Matching is exact.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "free" => Some(Self::Free),
            "starter" => Some(Self::Starter),
            "pro" => Some(Self::Pro),
            "unlimited" => Some(Self::Unlimited),
            _ => None,
        }
    }

    /// Position of the tier in the ascending order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The tier immediately above this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Free => Some(Self::Starter),
            Self::Starter => Some(Self::Pro),
            Self::Pro => Some(Self::Unlimited),
            Self::Unlimited => None,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
