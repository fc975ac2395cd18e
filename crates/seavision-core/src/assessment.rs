//! Assessment policy: fixed threshold tables that map a score to a verdict.
//!
//! [`AssessmentPolicy::classify`] is a pure function of the score it is
//! given. Thresholds are plain configuration values; every table has a
//! default and can be overridden from `seavision.toml`.

use serde::{Deserialize, Serialize};

use crate::catalog::VisionCategory;
use crate::model::Verdict;
use crate::scoring::{CategoryTally, ScoreDetail, ScoreResult};

/// Threshold tables for every quiz family.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessmentPolicy {
    pub ishihara: IshiharaPolicy,
    pub lantern: LanternPolicy,
    pub chart: ChartPolicy,
    pub hue_rank: RankDistancePolicy,
    pub hue_positional: PositionalPolicy,
    pub radar: RadarPolicy,
}

/// Ishihara classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IshiharaPolicy {
    /// Share of scored plates the winning category must agree with, in
    /// `[0, 1]`. Below it the result is inconclusive.
    pub min_agreement: f64,
}

impl Default for IshiharaPolicy {
    fn default() -> Self {
        Self { min_agreement: 0.5 }
    }
}

/// Lantern pass/fail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanternPolicy {
    /// Most pair errors that still pass (IMO practice: one).
    pub max_errors: u32,
}

impl Default for LanternPolicy {
    fn default() -> Self {
        Self { max_errors: 1 }
    }
}

/// Chart identification tiers, as accuracy percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartPolicy {
    pub excellent: f64,
    pub adequate: f64,
}

impl Default for ChartPolicy {
    fn default() -> Self {
        Self {
            excellent: 85.0,
            adequate: 70.0,
        }
    }
}

/// Hue rank-distance tiers, applied to the error above the minimum
/// achievable sum (so a perfect arrangement has excess zero).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankDistancePolicy {
    pub excellent: u32,
    pub good: u32,
    pub fair: u32,
}

impl Default for RankDistancePolicy {
    fn default() -> Self {
        Self {
            excellent: 4,
            good: 8,
            fair: 12,
        }
    }
}

/// Hue positional tiers, as accuracy percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionalPolicy {
    pub excellent: f64,
    pub good: f64,
    pub fair: f64,
}

impl Default for PositionalPolicy {
    fn default() -> Self {
        Self {
            excellent: 85.0,
            good: 70.0,
            fair: 50.0,
        }
    }
}

/// Radar battery tiers and the count-estimation partial-credit ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadarPolicy {
    pub pass: f64,
    pub borderline: f64,
    /// Points for an exact count; each unit of miss costs one point.
    pub count_ceiling: u32,
}

impl Default for RadarPolicy {
    fn default() -> Self {
        Self {
            pass: 80.0,
            borderline: 60.0,
            count_ceiling: 5,
        }
    }
}

impl AssessmentPolicy {
    /// Map a score to its verdict tier.
    pub fn classify(&self, result: &ScoreResult) -> Verdict {
        match &result.detail {
            ScoreDetail::NoData => Verdict::InsufficientData,
            ScoreDetail::Categories(tally) => self.classify_categories(tally),
            ScoreDetail::Pairs(tally) => {
                if tally.errors <= self.lantern.max_errors {
                    Verdict::Pass
                } else {
                    Verdict::Fail
                }
            }
            ScoreDetail::Labels(_) => {
                let accuracy = result.accuracy;
                if accuracy >= self.chart.excellent {
                    Verdict::Excellent
                } else if accuracy >= self.chart.adequate {
                    Verdict::Adequate
                } else {
                    Verdict::NeedsImprovement
                }
            }
            ScoreDetail::RankDistance(tally) => {
                let excess = tally.excess;
                if excess <= self.hue_rank.excellent {
                    Verdict::Excellent
                } else if excess <= self.hue_rank.good {
                    Verdict::Good
                } else if excess <= self.hue_rank.fair {
                    Verdict::Fair
                } else {
                    Verdict::NeedsImprovement
                }
            }
            ScoreDetail::Positional(_) => {
                let accuracy = result.accuracy;
                if accuracy >= self.hue_positional.excellent {
                    Verdict::Excellent
                } else if accuracy >= self.hue_positional.good {
                    Verdict::Good
                } else if accuracy >= self.hue_positional.fair {
                    Verdict::Fair
                } else {
                    Verdict::NeedsImprovement
                }
            }
            ScoreDetail::Composite(_) => {
                let accuracy = result.accuracy;
                if accuracy >= self.radar.pass {
                    Verdict::Pass
                } else if accuracy >= self.radar.borderline {
                    Verdict::Borderline
                } else {
                    Verdict::Fail
                }
            }
        }
    }

    /// The single highest category wins. A shared maximum, or a winner that
    /// agrees with too few plates, is inconclusive.
    fn classify_categories(&self, tally: &CategoryTally) -> Verdict {
        if tally.plates == 0 {
            return Verdict::InsufficientData;
        }
        let best = VisionCategory::ALL
            .iter()
            .map(|&c| tally.count(c))
            .max()
            .unwrap_or(0);
        let leaders: Vec<VisionCategory> = VisionCategory::ALL
            .into_iter()
            .filter(|&c| tally.count(c) == best)
            .collect();

        let agreement = f64::from(best) / f64::from(tally.plates);
        match leaders.as_slice() {
            [single] if agreement >= self.ishihara.min_agreement => match single {
                VisionCategory::Normal => Verdict::Normal,
                VisionCategory::Deutan => Verdict::Deutan,
                VisionCategory::Protan => Verdict::Protan,
            },
            _ => Verdict::Inconclusive,
        }
    }
}
