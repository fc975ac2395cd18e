//! Score results and the per-quiz scorers that produce them.
//!
//! Every scorer reduces an [`AnswerStore`] and its catalog to a
//! [`ScoreResult`]: a raw score, the maximum possible score, an accuracy
//! percentage and a verdict. The quiz-specific breakdown travels alongside in
//! [`ScoreDetail`].

pub mod chart;
pub mod ishihara;
pub mod lantern;
pub mod ordering;
pub mod radar;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerStore;
use crate::assessment::AssessmentPolicy;
use crate::catalog::{Catalog, ChartElement, DisplayMode, LightColor, RadarSubtest, VisionCategory};
use crate::error::QuizError;
use crate::model::{ItemId, QuizKind, Verdict};
use crate::traits::QuizItem;

pub use chart::{ChartResponse, ChartScorer};
pub use ishihara::IshiharaScorer;
pub use lantern::{LanternResponse, LanternScorer};
pub use ordering::{HueScorer, HueSet, OrderingMode};
pub use radar::{RadarResponse, RadarScorer};

/// `raw / max * 100`, or zero when there is nothing to score.
pub fn percentage(raw: u32, max: u32) -> f64 {
    if max == 0 {
        return 0.0;
    }
    f64::from(raw) / f64::from(max) * 100.0
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Final score of one completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Quiz family this score belongs to.
    pub quiz: QuizKind,
    /// Points earned. For rank-distance hue scoring this is the error sum,
    /// where lower is better.
    pub raw: u32,
    /// Maximum possible points (for rank-distance: the worst reachable sum).
    pub max: u32,
    /// Percentage in `[0, 100]`.
    pub accuracy: f64,
    pub verdict: Verdict,
    pub detail: ScoreDetail,
}

impl ScoreResult {
    /// A result with accuracy `raw / max` and a placeholder verdict; call
    /// [`ScoreResult::classified`] to assign the real one.
    pub fn new(quiz: QuizKind, raw: u32, max: u32, detail: ScoreDetail) -> Self {
        Self {
            quiz,
            raw,
            max,
            accuracy: percentage(raw, max),
            verdict: Verdict::InsufficientData,
            detail,
        }
    }

    /// The defined result for a quiz with no recorded answers.
    pub fn no_data(quiz: QuizKind, max: u32) -> Self {
        Self::new(quiz, 0, max, ScoreDetail::NoData)
    }

    /// Replace the accuracy, clamped to `[0, 100]`.
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy.clamp(0.0, 100.0);
        self
    }

    /// Assign the verdict `policy` gives this result.
    pub fn classified(mut self, policy: &AssessmentPolicy) -> Self {
        self.verdict = policy.classify(&self);
        self
    }

    pub fn has_data(&self) -> bool {
        !matches!(self.detail, ScoreDetail::NoData)
    }
}

/// Quiz-specific breakdown behind a [`ScoreResult`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScoreDetail {
    /// Nothing was answered.
    NoData,
    /// Ishihara category counters.
    Categories(CategoryTally),
    /// Lantern pair results.
    Pairs(PairTally),
    /// Chart element results with per-display-mode grouping.
    Labels(LabelTally),
    /// Hue rank-distance error.
    RankDistance(RankDistanceTally),
    /// Hue positional agreement.
    Positional(PositionalTally),
    /// Radar subtest breakdown.
    Composite(CompositeTally),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTally {
    /// Plates each category's expected reading agreed with.
    pub counts: BTreeMap<VisionCategory, u32>,
    /// Plates scored.
    pub plates: u32,
}

impl CategoryTally {
    pub fn count(&self, category: VisionCategory) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairTally {
    pub correct: u32,
    pub errors: u32,
    pub total: u32,
    pub rows: Vec<PairRow>,
}

/// One lantern pair as shown and as answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRow {
    pub item: ItemId,
    pub expected: (LightColor, LightColor),
    pub answered: Option<(LightColor, LightColor)>,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelTally {
    pub correct: u32,
    pub total: u32,
    /// Accuracy among the answers given under each display mode.
    pub per_mode: BTreeMap<DisplayMode, GroupAccuracy>,
    pub rows: Vec<LabelRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAccuracy {
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
}

impl GroupAccuracy {
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct,
            total,
            accuracy: percentage(correct, total),
        }
    }
}

/// One chart question as answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRow {
    pub item: ItemId,
    pub expected: ChartElement,
    pub answered: Option<ChartElement>,
    pub mode: Option<DisplayMode>,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankDistanceTally {
    /// Sum of neighbour distances, ends pinned.
    pub error_sum: u32,
    /// Sum for the canonical order (`N - 1`).
    pub minimum: u32,
    /// Largest sum any arrangement can reach.
    pub maximum: u32,
    /// `error_sum - minimum`.
    pub excess: u32,
    /// Sum for the exact reverse order (`3 * (N - 1)`).
    pub reverse_sum: u32,
    pub swatches: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionalTally {
    pub matches: u32,
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeTally {
    pub subtests: Vec<SubtestScore>,
}

impl CompositeTally {
    pub fn subtest(&self, subtest: RadarSubtest) -> Option<&SubtestScore> {
        self.subtests.iter().find(|s| s.subtest == subtest)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtestScore {
    pub subtest: RadarSubtest,
    pub score: u32,
    pub max: u32,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Fail if `answers` holds an identifier `catalog` does not know (a store
/// built for a different catalog).
pub(crate) fn ensure_known<R, T>(answers: &AnswerStore<R>, catalog: &Catalog<T>) -> Result<(), QuizError>
where
    R: crate::traits::Response,
    T: QuizItem,
{
    for id in answers.all().keys() {
        catalog.get(id)?;
    }
    Ok(())
}

pub(crate) fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
