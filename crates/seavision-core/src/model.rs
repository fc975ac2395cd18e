//! Core data model types for seavision.
//!
//! Identifiers and enumerations shared by every quiz: which quiz a result
//! belongs to, how items are addressed, and the verdict tiers a score maps to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five quiz families offered by the screening battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizKind {
    /// Pseudo-isochromatic plate naming.
    Ishihara,
    /// Navigation-light colour pairs.
    Lantern,
    /// ECDIS chart element identification.
    Chart,
    /// Hue arrangement (FM15 and the ECDIS hue set).
    Hue,
    /// Radar display colour discrimination battery.
    Radar,
}

impl QuizKind {
    pub const ALL: [QuizKind; 5] = [
        QuizKind::Ishihara,
        QuizKind::Lantern,
        QuizKind::Chart,
        QuizKind::Hue,
        QuizKind::Radar,
    ];

    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            QuizKind::Ishihara => "Ishihara Color Vision Test",
            QuizKind::Lantern => "Lantern Test",
            QuizKind::Chart => "ECDIS Chart Color Test",
            QuizKind::Hue => "Hue Arrangement Test",
            QuizKind::Radar => "Radar Color Discrimination Battery",
        }
    }
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizKind::Ishihara => write!(f, "ishihara"),
            QuizKind::Lantern => write!(f, "lantern"),
            QuizKind::Chart => write!(f, "chart"),
            QuizKind::Hue => write!(f, "hue"),
            QuizKind::Radar => write!(f, "radar"),
        }
    }
}

impl FromStr for QuizKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ishihara" | "plates" => Ok(QuizKind::Ishihara),
            "lantern" => Ok(QuizKind::Lantern),
            "chart" | "ecdis" => Ok(QuizKind::Chart),
            "hue" | "fm15" | "fm100" => Ok(QuizKind::Hue),
            "radar" => Ok(QuizKind::Radar),
            other => Err(format!("unknown quiz: {other}")),
        }
    }
}

/// Stable identifier of one item within a catalog (e.g. `plate-7`, `pair-3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Categorical outcome of a scored quiz.
///
/// Each quiz family uses its own subset of tiers; see
/// [`AssessmentPolicy`](crate::assessment::AssessmentPolicy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    // Ishihara classification
    Normal,
    Deutan,
    Protan,
    Inconclusive,
    // Lantern and radar
    Pass,
    Borderline,
    Fail,
    // Chart and hue
    Excellent,
    Good,
    Adequate,
    Fair,
    NeedsImprovement,
    /// Nothing was answered, so there is nothing to grade.
    InsufficientData,
}

impl Verdict {
    /// Returns `true` for tiers that clear the quiz's passing bar.
    pub fn is_passing(&self) -> bool {
        matches!(
            self,
            Verdict::Normal
                | Verdict::Pass
                | Verdict::Excellent
                | Verdict::Good
                | Verdict::Adequate
        )
    }

    /// Label suitable for a results screen or certificate.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Normal => "Likely normal color vision",
            Verdict::Deutan => "Possible deuteranopia (green deficiency)",
            Verdict::Protan => "Possible protanopia (red deficiency)",
            Verdict::Inconclusive => "Inconclusive",
            Verdict::Pass => "Pass",
            Verdict::Borderline => "Borderline",
            Verdict::Fail => "Fail",
            Verdict::Excellent => "Excellent",
            Verdict::Good => "Good",
            Verdict::Adequate => "Adequate",
            Verdict::Fair => "Fair",
            Verdict::NeedsImprovement => "Needs improvement",
            Verdict::InsufficientData => "Insufficient data",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_kind_display_and_parse() {
        assert_eq!(QuizKind::Chart.to_string(), "chart");
        assert_eq!("ECDIS".parse::<QuizKind>().unwrap(), QuizKind::Chart);
        assert_eq!("fm15".parse::<QuizKind>().unwrap(), QuizKind::Hue);
        assert_eq!(" Lantern ".parse::<QuizKind>().unwrap(), QuizKind::Lantern);
        assert!("snellen".parse::<QuizKind>().is_err());
        for kind in QuizKind::ALL {
            assert_eq!(kind.to_string().parse::<QuizKind>().unwrap(), kind);
        }
    }

    #[test]
    fn verdict_serializes_kebab_case() {
        let json = serde_json::to_string(&Verdict::NeedsImprovement).unwrap();
        assert_eq!(json, "\"needs-improvement\"");
        let back: Verdict = serde_json::from_str("\"insufficient-data\"").unwrap();
        assert_eq!(back, Verdict::InsufficientData);
    }

    #[test]
    fn passing_tiers() {
        assert!(Verdict::Pass.is_passing());
        assert!(Verdict::Adequate.is_passing());
        assert!(!Verdict::Fair.is_passing());
        assert!(!Verdict::Inconclusive.is_passing());
        assert!(!Verdict::InsufficientData.is_passing());
    }
}
