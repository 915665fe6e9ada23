//! Display formatting for plan attributes.
//!
//! These helpers have an exact output contract that display code relies on:
//! a zero price renders as the localized "free" label and the unlimited
//! property limit renders as a fixed word, never a number.

use serde::{Deserialize, Serialize};

use super::types::PropertyLimit;

/// Display language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Hungarian.
    #[default]
    Hu,
    /// English.
    En,
}

/// Formats a per-period price given in minor units (fillér).
///
/// Whole forints are grouped by thousands with a space; a non-zero fillér
/// part is appended with the locale's decimal separator.
#[must_use]
pub fn format_price(price_minor_units: u64, locale: Locale) -> String {
    if price_minor_units == 0 {
        return match locale {
            Locale::Hu => "Ingyenes",
            Locale::En => "Free",
        }
        .to_string();
    }

    let whole = group_thousands(price_minor_units / 100);
    let fraction = price_minor_units % 100;
    let amount = match (fraction, locale) {
        (0, _) => whole,
        (f, Locale::Hu) => format!("{whole},{f:02}"),
        (f, Locale::En) => format!("{whole}.{f:02}"),
    };

    match locale {
        Locale::Hu => format!("{amount} Ft/hó"),
        Locale::En => format!("{amount} Ft/month"),
    }
}

/// Formats a property allowance.
#[must_use]
pub fn format_property_limit(limit: PropertyLimit, locale: Locale) -> String {
    match (limit, locale) {
        (PropertyLimit::Limited(max), _) => max.to_string(),
        (PropertyLimit::Unlimited, Locale::Hu) => "Korlátlan".to_string(),
        (PropertyLimit::Unlimited, Locale::En) => "Unlimited".to_string(),
    }
}

/// Formats the AI capability flag.
#[must_use]
pub fn format_ai_status(ai_enabled: bool, locale: Locale) -> String {
    let label = match (ai_enabled, locale) {
        (true, Locale::Hu) => "AI asszisztens",
        (true, Locale::En) => "AI assistant",
        (false, Locale::Hu) => "AI nélkül",
        (false, Locale::En) => "No AI",
    };
    label.to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, Locale::Hu, "Ingyenes")]
    #[case(0, Locale::En, "Free")]
    #[case(499_000, Locale::Hu, "4 990 Ft/hó")]
    #[case(499_000, Locale::En, "4 990 Ft/month")]
    #[case(1_999_000, Locale::Hu, "19 990 Ft/hó")]
    #[case(50_000, Locale::Hu, "500 Ft/hó")]
    #[case(123_456_700, Locale::Hu, "1 234 567 Ft/hó")]
    #[case(499_050, Locale::Hu, "4 990,50 Ft/hó")]
    #[case(499_005, Locale::En, "4 990.05 Ft/month")]
    #[case(1, Locale::Hu, "0,01 Ft/hó")]
    fn test_format_price(#[case] minor: u64, #[case] locale: Locale, #[case] expected: &str) {
        assert_eq!(format_price(minor, locale), expected);
    }

    #[rstest]
    #[case(PropertyLimit::Limited(1), Locale::Hu, "1")]
    #[case(PropertyLimit::Limited(10), Locale::En, "10")]
    #[case(PropertyLimit::Unlimited, Locale::Hu, "Korlátlan")]
    #[case(PropertyLimit::Unlimited, Locale::En, "Unlimited")]
    fn test_format_property_limit(
        #[case] limit: PropertyLimit,
        #[case] locale: Locale,
        #[case] expected: &str,
    ) {
        assert_eq!(format_property_limit(limit, locale), expected);
    }

    #[test]
    fn test_format_ai_status() {
        assert_eq!(format_ai_status(true, Locale::Hu), "AI asszisztens");
        assert_eq!(format_ai_status(false, Locale::Hu), "AI nélkül");
        assert_eq!(format_ai_status(true, Locale::En), "AI assistant");
        assert_eq!(format_ai_status(false, Locale::En), "No AI");
    }

    #[test]
    fn test_default_locale_is_hungarian() {
        assert_eq!(Locale::default(), Locale::Hu);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1 000");
        assert_eq!(group_thousands(1_000_000), "1 000 000");
    }
}
