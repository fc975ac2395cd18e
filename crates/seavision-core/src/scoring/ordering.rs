//! Arrangement scoring for hue-ordering tasks.
//!
//! An arrangement is recorded as one answer per swatch: the slot it was
//! placed in. Two scoring modes exist and are not interchangeable:
//!
//! * **Rank distance** sums the canonical-rank gaps between neighbours, with
//!   both ends pinned to their correct ranks. A correct order sums to
//!   `N - 1`, each adjacent swap adds 2, and the exact reverse sums to
//!   `3 * (N - 1)`. Zigzag orders go higher; [`rank_distance_max`] is the
//!   true ceiling.
//! * **Positional** counts swatches sitting in exactly their canonical slot.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerStore;
use crate::assessment::AssessmentPolicy;
use crate::catalog::{self, Catalog, Swatch};
use crate::error::QuizError;
use crate::model::QuizKind;
use crate::traits::Scorer;

use super::{count_u32, ensure_known, PositionalTally, RankDistanceTally, ScoreDetail, ScoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderingMode {
    #[default]
    RankDistance,
    Positional,
}

impl fmt::Display for OrderingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderingMode::RankDistance => write!(f, "rank-distance"),
            OrderingMode::Positional => write!(f, "positional"),
        }
    }
}

impl FromStr for OrderingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rank-distance" | "rank" | "distance" => Ok(OrderingMode::RankDistance),
            "positional" | "position" => Ok(OrderingMode::Positional),
            other => Err(format!("unknown ordering mode: {other}")),
        }
    }
}

/// Built-in swatch sets for the hue quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HueSet {
    /// 15 spectral swatches.
    #[default]
    Fm15,
    /// 8 ECDIS palette swatches.
    Ecdis,
}

impl HueSet {
    pub fn catalog(&self) -> Arc<Catalog<Swatch>> {
        match self {
            HueSet::Fm15 => catalog::fm15(),
            HueSet::Ecdis => catalog::ecdis_hue(),
        }
    }

    /// FM15 is scored by rank distance, the ECDIS set positionally.
    pub fn default_mode(&self) -> OrderingMode {
        match self {
            HueSet::Fm15 => OrderingMode::RankDistance,
            HueSet::Ecdis => OrderingMode::Positional,
        }
    }
}

impl fmt::Display for HueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HueSet::Fm15 => write!(f, "fm15"),
            HueSet::Ecdis => write!(f, "ecdis"),
        }
    }
}

impl FromStr for HueSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fm15" | "fm" => Ok(HueSet::Fm15),
            "ecdis" | "eh" => Ok(HueSet::Ecdis),
            other => Err(format!("unknown hue set: {other}")),
        }
    }
}

/// Sum of `|rank[i] - rank[i-1]|` over the arrangement, plus the distance of
/// the first swatch from rank `0` and of the last from rank `N - 1`.
///
/// Without the pinned ends a reversed list would sum to `N - 1`, the same as
/// the correct one.
pub fn rank_distance(ranks: &[usize]) -> u32 {
    let Some((&first, &last)) = ranks.first().zip(ranks.last()) else {
        return 0;
    };
    let n = ranks.len();
    let inner: usize = ranks.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
    let head = first;
    let tail = (n - 1).abs_diff(last);
    count_u32(inner + head + tail)
}

/// Largest [`rank_distance`] any arrangement of `n` swatches can reach.
///
/// The ends are fixed at `0` and `n - 1`, so the best path alternates between
/// the `n / 2` highest and `n / 2` lowest ranks: every high rank counts twice
/// as a peak and every low rank twice as a valley.
pub fn rank_distance_max(n: usize) -> u32 {
    let k = n / 2;
    count_u32(n.saturating_sub(1) + 2 * k * (n - k))
}

/// Number of slots holding the swatch whose canonical rank is that slot.
pub fn positional_matches(ranks: &[usize]) -> u32 {
    count_u32(ranks.iter().enumerate().filter(|&(slot, &rank)| slot == rank).count())
}

/// Canonical ranks of the swatches, in the order they were placed.
///
/// Every swatch must have exactly one slot and every slot exactly one swatch.
pub fn arrangement_from_store(
    answers: &AnswerStore<usize>,
    catalog: &Catalog<Swatch>,
) -> Result<Vec<usize>, QuizError> {
    let n = catalog.len();
    let mut slots: Vec<Option<usize>> = vec![None; n];
    for (rank, swatch) in catalog.items().iter().enumerate() {
        let slot = *answers.get(&swatch.id).ok_or_else(|| {
            QuizError::InvalidArrangement(format!("swatch '{}' has not been placed", swatch.id))
        })?;
        let cell = slots.get_mut(slot).ok_or_else(|| {
            QuizError::InvalidArrangement(format!("slot {slot} is outside 0..{n}"))
        })?;
        if cell.is_some() {
            return Err(QuizError::InvalidArrangement(format!(
                "slot {slot} holds more than one swatch"
            )));
        }
        *cell = Some(rank);
    }
    // n swatches in n distinct in-range slots fill every slot.
    Ok(slots.into_iter().flatten().collect())
}

/// Scores a completed arrangement in the configured mode.
#[derive(Debug, Clone, Default)]
pub struct HueScorer {
    mode: OrderingMode,
    policy: AssessmentPolicy,
}

impl HueScorer {
    pub fn new(mode: OrderingMode, policy: AssessmentPolicy) -> Self {
        Self { mode, policy }
    }

    pub fn mode(&self) -> OrderingMode {
        self.mode
    }

    /// Score canonical ranks listed in placement order.
    pub fn score_ranks(&self, ranks: &[usize]) -> ScoreResult {
        let n = count_u32(ranks.len());
        match self.mode {
            OrderingMode::RankDistance => {
                let error_sum = rank_distance(ranks);
                let minimum = n.saturating_sub(1);
                let maximum = rank_distance_max(ranks.len());
                let excess = error_sum.saturating_sub(minimum);
                let accuracy = if maximum == minimum {
                    if excess == 0 { 100.0 } else { 0.0 }
                } else {
                    f64::from(maximum.saturating_sub(error_sum)) * 100.0
                        / f64::from(maximum - minimum)
                };
                tracing::debug!(error_sum, minimum, maximum, excess, "hue rank distance");
                let tally = RankDistanceTally {
                    error_sum,
                    minimum,
                    maximum,
                    excess,
                    reverse_sum: 3 * minimum,
                    swatches: n,
                };
                ScoreResult::new(
                    QuizKind::Hue,
                    error_sum,
                    maximum,
                    ScoreDetail::RankDistance(tally),
                )
                .with_accuracy(accuracy)
                .classified(&self.policy)
            }
            OrderingMode::Positional => {
                let matches = positional_matches(ranks);
                tracing::debug!(matches, total = n, "hue positional");
                ScoreResult::new(
                    QuizKind::Hue,
                    matches,
                    n,
                    ScoreDetail::Positional(PositionalTally { matches, total: n }),
                )
                .classified(&self.policy)
            }
        }
    }
}

impl Scorer for HueScorer {
    type Item = Swatch;
    type Response = usize;

    fn quiz(&self) -> QuizKind {
        QuizKind::Hue
    }

    fn compute(
        &self,
        answers: &AnswerStore<usize>,
        catalog: &Catalog<Swatch>,
    ) -> Result<ScoreResult, QuizError> {
        ensure_known(answers, catalog)?;
        if answers.is_empty() {
            return Ok(ScoreResult::no_data(QuizKind::Hue, count_u32(catalog.len()))
                .classified(&self.policy));
        }
        let ranks = arrangement_from_store(answers, catalog)?;
        Ok(self.score_ranks(&ranks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemId, Verdict};

    fn place(catalog: &Catalog<Swatch>, ranks: &[usize]) -> AnswerStore<usize> {
        let mut store = AnswerStore::for_catalog(catalog);
        for (slot, &rank) in ranks.iter().enumerate() {
            store.set(&catalog.items()[rank].id, slot).unwrap();
        }
        store
    }

    #[test]
    fn canonical_order_sums_to_n_minus_one() {
        let ranks: Vec<usize> = (0..8).collect();
        assert_eq!(rank_distance(&ranks), 7);
        let ranks: Vec<usize> = (0..15).collect();
        assert_eq!(rank_distance(&ranks), 14);
    }

    #[test]
    fn adjacent_swap_adds_two() {
        for i in 0..7 {
            let mut ranks: Vec<usize> = (0..8).collect();
            ranks.swap(i, i + 1);
            assert_eq!(rank_distance(&ranks), 9, "swap at {i}");
        }
    }

    /// Every permutation of `0..n`, in no particular order.
    fn permutations(n: usize) -> Vec<Vec<usize>> {
        let mut out = Vec::new();
        let mut current: Vec<usize> = (0..n).collect();
        permute(&mut current, 0, &mut out);
        out
    }

    fn permute(items: &mut [usize], start: usize, out: &mut Vec<Vec<usize>>) {
        if start == items.len() {
            out.push(items.to_vec());
            return;
        }
        for i in start..items.len() {
            items.swap(start, i);
            permute(items, start + 1, out);
            items.swap(start, i);
        }
    }

    #[test]
    fn maximum_bounds_every_arrangement() {
        for n in 1..=8 {
            let all = permutations(n);
            let reached = all.iter().map(|p| rank_distance(p)).max().unwrap();
            assert_eq!(reached, rank_distance_max(n), "n = {n}");

            let scorer = HueScorer::default();
            for ranks in &all {
                let result = scorer.score_ranks(ranks);
                assert!(result.raw <= result.max, "{ranks:?}: {} > {}", result.raw, result.max);
                assert!((0.0..=100.0).contains(&result.accuracy));
            }
        }
        assert_eq!(rank_distance_max(15), 126);
    }

    #[test]
    fn zigzag_outscores_reverse() {
        let zigzag: [usize; 8] = [7, 0, 6, 1, 5, 2, 4, 3];
        let result = HueScorer::default().score_ranks(&zigzag);
        assert_eq!(result.raw, 39);
        assert_eq!(result.max, 39);
        assert_eq!(result.accuracy, 0.0);

        let reversed: Vec<usize> = (0..8).rev().collect();
        assert_eq!(rank_distance(&reversed), 21);
        let ScoreDetail::RankDistance(tally) = scorer_detail(&reversed) else {
            panic!("expected rank distance detail");
        };
        assert_eq!(tally.reverse_sum, 21);
        assert_eq!(tally.maximum, 39);
    }

    fn scorer_detail(ranks: &[usize]) -> ScoreDetail {
        HueScorer::default().score_ranks(ranks).detail
    }

    #[test]
    fn reversed_ecdis_set_needs_improvement() {
        let catalog = catalog::ecdis_hue();
        let reversed: Vec<usize> = (0..8).rev().collect();
        let store = place(&catalog, &reversed);
        let result = HueScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.raw, 21);
        assert_eq!(result.max, 39);
        assert!((result.accuracy - 56.25).abs() < 1e-9);
        assert_eq!(result.verdict, Verdict::NeedsImprovement);
    }

    #[test]
    fn perfect_fm15_is_excellent() {
        let catalog = catalog::fm15();
        let ranks: Vec<usize> = (0..15).collect();
        let result = HueScorer::default()
            .compute(&place(&catalog, &ranks), &catalog)
            .unwrap();
        assert_eq!(result.raw, 14);
        assert!((result.accuracy - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.verdict, Verdict::Excellent);
    }

    #[test]
    fn positional_mode_counts_exact_slots() {
        let catalog = catalog::ecdis_hue();
        let mut ranks: Vec<usize> = (0..8).collect();
        ranks.swap(0, 1);
        let scorer = HueScorer::new(OrderingMode::Positional, AssessmentPolicy::default());
        let result = scorer.compute(&place(&catalog, &ranks), &catalog).unwrap();
        assert_eq!(result.raw, 6);
        assert_eq!(result.max, 8);
        assert!((result.accuracy - 75.0).abs() < f64::EPSILON);
        assert_eq!(result.verdict, Verdict::Good);

        // The same arrangement is near-perfect under rank distance.
        let rank = HueScorer::default()
            .compute(&place(&catalog, &ranks), &catalog)
            .unwrap();
        assert_eq!(rank.verdict, Verdict::Excellent);
    }

    #[test]
    fn incomplete_arrangement_is_rejected() {
        let catalog = catalog::ecdis_hue();
        let mut store = place(&catalog, &(0..8).collect::<Vec<_>>());
        store.clear(&ItemId::from("eh-03"));
        let err = HueScorer::default().compute(&store, &catalog).unwrap_err();
        assert!(matches!(err, QuizError::InvalidArrangement(_)));

        store.set(&ItemId::from("eh-03"), 0).unwrap();
        assert!(HueScorer::default().compute(&store, &catalog).is_err());

        store.set(&ItemId::from("eh-03"), 8).unwrap();
        assert!(HueScorer::default().compute(&store, &catalog).is_err());
    }

    #[test]
    fn arrangement_maps_slots_to_ranks() {
        let catalog = catalog::ecdis_hue();
        let order = [3, 0, 1, 2, 4, 5, 7, 6];
        let store = place(&catalog, &order);
        assert_eq!(arrangement_from_store(&store, &catalog).unwrap(), order.to_vec());
    }

    #[test]
    fn hue_sets_pick_their_catalog_and_mode() {
        assert_eq!(HueSet::Fm15.catalog().len(), 15);
        assert_eq!(HueSet::Ecdis.catalog().len(), 8);
        assert_eq!(HueSet::Ecdis.default_mode(), OrderingMode::Positional);
        assert_eq!("ECDIS".parse::<HueSet>().unwrap(), HueSet::Ecdis);
    }

    #[test]
    fn mode_parsing() {
        assert_eq!("positional".parse::<OrderingMode>().unwrap(), OrderingMode::Positional);
        assert_eq!("Rank-Distance".parse::<OrderingMode>().unwrap(), OrderingMode::RankDistance);
        assert!("random".parse::<OrderingMode>().is_err());
    }
}
