//! Exact-match scoring for Ishihara plates.

use std::collections::BTreeMap;

use crate::answers::{fold, AnswerStore};
use crate::assessment::AssessmentPolicy;
use crate::catalog::{Catalog, IshiharaPlate, VisionCategory};
use crate::error::QuizError;
use crate::model::QuizKind;
use crate::traits::Scorer;

use super::{count_u32, ensure_known, CategoryTally, ScoreDetail, ScoreResult};

/// Counts, per vision category, the plates whose expected reading matches the
/// participant's answer. A plate can match several categories at once.
#[derive(Debug, Clone, Default)]
pub struct IshiharaScorer {
    policy: AssessmentPolicy,
}

impl IshiharaScorer {
    pub fn new(policy: AssessmentPolicy) -> Self {
        Self { policy }
    }

    /// Category counters over every plate of `catalog`. An unanswered plate
    /// reads as blank.
    pub fn tally(answers: &AnswerStore<String>, catalog: &Catalog<IshiharaPlate>) -> CategoryTally {
        let mut counts: BTreeMap<VisionCategory, u32> =
            VisionCategory::ALL.iter().map(|&c| (c, 0)).collect();
        for plate in catalog.items() {
            let answer = answers.folded(&plate.id);
            for category in VisionCategory::ALL {
                if answer == fold(plate.expected(category)) {
                    *counts.entry(category).or_default() += 1;
                }
            }
        }
        CategoryTally {
            counts,
            plates: count_u32(catalog.len()),
        }
    }
}

impl Scorer for IshiharaScorer {
    type Item = IshiharaPlate;
    type Response = String;

    fn quiz(&self) -> QuizKind {
        QuizKind::Ishihara
    }

    fn compute(
        &self,
        answers: &AnswerStore<String>,
        catalog: &Catalog<IshiharaPlate>,
    ) -> Result<ScoreResult, QuizError> {
        ensure_known(answers, catalog)?;
        let plates = count_u32(catalog.len());
        if answers.is_empty() {
            return Ok(ScoreResult::no_data(QuizKind::Ishihara, plates).classified(&self.policy));
        }

        let tally = Self::tally(answers, catalog);
        let normal = tally.count(VisionCategory::Normal);
        tracing::debug!(
            normal,
            deutan = tally.count(VisionCategory::Deutan),
            protan = tally.count(VisionCategory::Protan),
            plates,
            "ishihara tally"
        );
        Ok(
            ScoreResult::new(QuizKind::Ishihara, normal, plates, ScoreDetail::Categories(tally))
                .classified(&self.policy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::{ItemId, Verdict};

    fn answer_all(
        catalog: &Catalog<IshiharaPlate>,
        category: VisionCategory,
    ) -> AnswerStore<String> {
        let mut store = AnswerStore::for_catalog(catalog);
        for plate in catalog.items() {
            store
                .set(&plate.id, plate.expected(category).to_string())
                .unwrap();
        }
        store
    }

    #[test]
    fn shared_reading_increments_every_category() {
        let full = catalog::ishihara();
        let twelves: Vec<IshiharaPlate> = full
            .items()
            .iter()
            .take(1)
            .cloned()
            .chain(std::iter::once(IshiharaPlate {
                id: ItemId::from("plate-12b"),
                number: 25,
                normal: "12".into(),
                deutan: "12".into(),
                protan: "12".into(),
                description: String::new(),
            }))
            .collect();
        let catalog = Catalog::new(QuizKind::Ishihara, "twelves", twelves).unwrap();
        let mut store = AnswerStore::for_catalog(&catalog);
        for id in catalog.ids() {
            store.set(id, "12".into()).unwrap();
        }

        let tally = IshiharaScorer::tally(&store, &catalog);
        for category in VisionCategory::ALL {
            assert_eq!(tally.count(category), 2);
        }
        // All three tied at the top.
        let result = IshiharaScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.verdict, Verdict::Inconclusive);
    }

    #[test]
    fn empty_answer_matches_empty_expectation() {
        let catalog = catalog::ishihara();
        let mut store = AnswerStore::for_catalog(&catalog);
        store.set(&IshiharaPlate::plate_id(18), String::new()).unwrap();

        let single = catalog.subset([IshiharaPlate::plate_id(18)].iter()).unwrap();
        let tally = IshiharaScorer::tally(&store, &single);
        assert_eq!(tally.count(VisionCategory::Normal), 1);
        assert_eq!(tally.count(VisionCategory::Deutan), 0);
    }

    #[test]
    fn normal_reader_is_classified_normal() {
        let catalog = catalog::ishihara();
        let store = answer_all(&catalog, VisionCategory::Normal);
        let result = IshiharaScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.raw, 24);
        assert_eq!(result.max, 24);
        assert!((result.accuracy - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.verdict, Verdict::Normal);
    }

    #[test]
    fn protan_reader_is_classified_protan() {
        let catalog = catalog::ishihara();
        let store = answer_all(&catalog, VisionCategory::Protan);
        let result = IshiharaScorer::default().compute(&store, &catalog).unwrap();
        let ScoreDetail::Categories(tally) = &result.detail else {
            panic!("expected category detail");
        };
        // Protan and deutan readings differ only on the last three plates.
        assert_eq!(tally.count(VisionCategory::Protan), 24);
        assert_eq!(tally.count(VisionCategory::Deutan), 21);
        assert_eq!(result.verdict, Verdict::Protan);
    }

    #[test]
    fn answers_are_folded_before_comparison() {
        let catalog = catalog::ishihara();
        let mut store = AnswerStore::for_catalog(&catalog);
        store.set(&IshiharaPlate::plate_id(1), " 12 ".into()).unwrap();
        let tally = IshiharaScorer::tally(&store, &catalog);
        assert!(tally.count(VisionCategory::Normal) >= 1);
    }

    #[test]
    fn zero_answers_is_insufficient_data() {
        let catalog = catalog::ishihara();
        let store = AnswerStore::for_catalog(&catalog);
        let result = IshiharaScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.raw, 0);
        assert_eq!(result.accuracy, 0.0);
        assert_eq!(result.verdict, Verdict::InsufficientData);
    }

    #[test]
    fn store_for_another_catalog_is_rejected() {
        let full = catalog::ishihara();
        let mut store = AnswerStore::for_catalog(&full);
        store.set(&IshiharaPlate::plate_id(24), "35".into()).unwrap();
        let subset = full.subset([IshiharaPlate::plate_id(1)].iter()).unwrap();
        assert!(IshiharaScorer::default().compute(&store, &subset).is_err());
    }

    #[test]
    fn scoring_is_idempotent() {
        let catalog = catalog::ishihara();
        let store = answer_all(&catalog, VisionCategory::Deutan);
        let scorer = IshiharaScorer::default();
        let first = scorer.compute(&store, &catalog).unwrap();
        let second = scorer.compute(&store, &catalog).unwrap();
        assert_eq!(first, second);
    }
}
