//! Alert severity classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Keywords that mark an alert as severe. Checked before the moderate set.
const SEVERE_KEYWORDS: &[&str] = &["suspend", "emergency", "closed"];

/// Keywords that mark an alert as moderate.
const MODERATE_KEYWORDS: &[&str] = &["delay", "slow"];

/// Alert urgency. Every normalized alert carries exactly one of these
/// three values; upstream records with anything else are re-classified
/// from their text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Severe,
    Moderate,
    Low,
}

impl Severity {
    /// Parse an upstream severity value. Accepts any case; values outside
    /// the three known ones (including `"UNKNOWN"`) return `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "SEVERE" => Some(Self::Severe),
            "MODERATE" => Some(Self::Moderate),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    /// Classify free-form alert text. The input is lowercased before the
    /// keyword tables are consulted; severe keywords win over moderate ones,
    /// and text matching neither set is `Low`.
    pub fn classify_text(text: &str) -> Self {
        let text = text.to_lowercase();
        if SEVERE_KEYWORDS.iter().any(|k| text.contains(k)) {
            Self::Severe
        } else if MODERATE_KEYWORDS.iter().any(|k| text.contains(k)) {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// The canonical uppercase wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Severe => "SEVERE",
            Self::Moderate => "MODERATE",
            Self::Low => "LOW",
        }
    }

    /// All severities, in display order.
    pub fn all() -> &'static [Severity] {
        &[Self::Severe, Self::Moderate, Self::Low]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values_any_case() {
        assert_eq!(Severity::parse("SEVERE"), Some(Severity::Severe));
        assert_eq!(Severity::parse("severe"), Some(Severity::Severe));
        assert_eq!(Severity::parse("Moderate"), Some(Severity::Moderate));
        assert_eq!(Severity::parse(" low "), Some(Severity::Low));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(Severity::parse("UNKNOWN"), None);
        assert_eq!(Severity::parse(""), None);
        assert_eq!(Severity::parse("CRITICAL"), None);
    }

    #[test]
    fn test_classify_severe_keywords() {
        assert_eq!(
            Severity::classify_text("Service Suspended on 4 train"),
            Severity::Severe
        );
        assert_eq!(Severity::classify_text("EMERGENCY repairs"), Severity::Severe);
        assert_eq!(Severity::classify_text("Station closed"), Severity::Severe);
    }

    #[test]
    fn test_classify_moderate_keywords() {
        assert_eq!(Severity::classify_text("Expect delays"), Severity::Moderate);
        assert_eq!(Severity::classify_text("Trains running slow"), Severity::Moderate);
    }

    #[test]
    fn test_severe_wins_over_moderate() {
        // Both keyword sets present: the severe table is consulted first.
        assert_eq!(
            Severity::classify_text("Suspended service causing delays"),
            Severity::Severe
        );
    }

    #[test]
    fn test_classify_default_low() {
        assert_eq!(Severity::classify_text("Escalator cleaning"), Severity::Low);
        assert_eq!(Severity::classify_text(""), Severity::Low);
    }

    #[test]
    fn test_wire_form_is_uppercase() {
        let json = serde_json::to_string(&Severity::Severe).unwrap();
        assert_eq!(json, "\"SEVERE\"");
        let back: Severity = serde_json::from_str("\"MODERATE\"").unwrap();
        assert_eq!(back, Severity::Moderate);
    }
}
