//! Monetary value candidates parsed out of noisy ticket text.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

lazy_static! {
    /// Maximal runs of digits and separator characters. The comma stays in
    /// the class even though normalization strips it, so a partially
    /// normalized fragment still tokenizes as one run instead of splitting
    /// mid-number.
    static ref CANDIDATE_RUN: Regex = Regex::new(r"[0-9.,]+").unwrap();
}

/// Numeric formatting convention used to normalize ticket text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Brazilian: "." thousands separator, "," decimal point.
    Br,
    /// US: "," thousands separator, "." decimal point.
    Us,
}

impl Locale {
    /// Locale search order used by value resolution.
    pub const ALL: [Locale; 2] = [Locale::Br, Locale::Us];

    fn normalize(self, text: &str) -> String {
        match self {
            Locale::Br => text.replace('.', "").replace(',', "."),
            Locale::Us => text.replace(',', ""),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::Br => f.write_str("br"),
            Locale::Us => f.write_str("us"),
        }
    }
}

impl FromStr for Locale {
    type Err = ExtractionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "br" => Ok(Locale::Br),
            "us" => Ok(Locale::Us),
            other => Err(ExtractionError::UnknownLocale(other.to_string())),
        }
    }
}

/// Parse every plausible monetary value out of `text`, in order of
/// appearance.
///
/// Tokens that are bare digit runs are discarded: on a payment ticket
/// those are barcodes, document numbers and bank codes rather than
/// amounts. The cost is that a genuine amount printed without a decimal
/// separator ("1500" alone) is dropped as well.
pub fn extract_candidates(text: &str, locale: Locale) -> Vec<f64> {
    let normalized = locale.normalize(text);

    CANDIDATE_RUN
        .find_iter(&normalized)
        .filter_map(|run| {
            let token = run.as_str();
            if token.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            f64::from_str(token).ok()
        })
        .collect()
}

/// Truncate toward zero to `digits` decimal places. Truncation, not
/// rounding: 1500.005 becomes 1500.00.
pub fn truncate(value: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    (value * scale).trunc() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn br_locale_parses_brazilian_amounts() {
        let candidates = extract_candidates("R$ 1.234,56", Locale::Br);
        assert_eq!(candidates, vec![1234.56]);
    }

    #[test]
    fn us_locale_parses_us_amounts() {
        let candidates = extract_candidates("Total 1,234.56", Locale::Us);
        assert_eq!(candidates, vec![1234.56]);
    }

    #[test]
    fn bare_digit_runs_are_dropped() {
        // "123" is a code, not an amount; it has no decimal separator
        // after normalization.
        let candidates = extract_candidates("doc 123 valor 45,90", Locale::Br);
        assert_eq!(candidates, vec![45.90]);
    }

    #[test]
    fn integer_amount_without_separator_is_dropped() {
        let candidates = extract_candidates("Valor: 1500", Locale::Br);
        assert!(candidates.is_empty());
    }

    #[test]
    fn candidates_keep_order_of_appearance() {
        let candidates = extract_candidates("2,50 depois 1,25 e 10,00", Locale::Br);
        assert_eq!(candidates, vec![2.50, 1.25, 10.00]);
    }

    #[test]
    fn malformed_runs_are_dropped() {
        // After us normalization "1.2.3" keeps both dots and fails to
        // parse as a float.
        let candidates = extract_candidates("1.2.3 ok 7.5", Locale::Us);
        assert_eq!(candidates, vec![7.5]);
    }

    #[test]
    fn locale_names_round_trip() {
        assert_eq!("br".parse::<Locale>().unwrap(), Locale::Br);
        assert_eq!("us".parse::<Locale>().unwrap(), Locale::Us);
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(ExtractionError::UnknownLocale(_))
        ));
    }

    #[test]
    fn truncate_never_rounds() {
        assert_eq!(truncate(1500.005, 2), 1500.0);
        assert_eq!(truncate(1234.567, 2), 1234.56);
        assert_eq!(truncate(99.999, 2), 99.99);
        assert_eq!(truncate(10.0, 2), 10.0);
    }
}
