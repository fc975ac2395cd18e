//! Single-label scoring for ECDIS chart element identification.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerStore;
use crate::assessment::AssessmentPolicy;
use crate::catalog::{Catalog, ChartElement, ChartQuestion, DisplayMode};
use crate::error::QuizError;
use crate::model::QuizKind;
use crate::traits::{Response, Scorer};

use super::{count_u32, ensure_known, GroupAccuracy, LabelRow, LabelTally, ScoreDetail, ScoreResult};

/// The element picked for a question and the display mode active at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub element: ChartElement,
    pub mode: DisplayMode,
}

impl ChartResponse {
    pub fn new(element: ChartElement, mode: DisplayMode) -> Self {
        Self { element, mode }
    }

    /// Parse `element` or `element@mode` (e.g. `danger@night`). Without a
    /// mode the answer is taken under `default_mode`.
    pub fn parse(input: &str, default_mode: DisplayMode) -> Result<Self, QuizError> {
        match input.split_once('@') {
            Some((element, mode)) => Ok(Self::new(element.parse()?, mode.parse()?)),
            None => Ok(Self::new(input.parse()?, default_mode)),
        }
    }
}

impl Response for ChartResponse {}

#[derive(Debug, Clone, Default)]
pub struct ChartScorer {
    policy: AssessmentPolicy,
}

impl ChartScorer {
    pub fn new(policy: AssessmentPolicy) -> Self {
        Self { policy }
    }
}

impl Scorer for ChartScorer {
    type Item = ChartQuestion;
    type Response = ChartResponse;

    fn quiz(&self) -> QuizKind {
        QuizKind::Chart
    }

    fn check(&self, item: &ChartQuestion, response: &ChartResponse) -> Result<(), QuizError> {
        if ChartElement::SELECTABLE.contains(&response.element) {
            Ok(())
        } else {
            Err(QuizError::ResponseMismatch {
                item: item.id.clone(),
                reason: format!("'{}' is not a selectable element", response.element.label()),
            })
        }
    }

    /// Overall accuracy is over every question. The per-mode breakdown only
    /// counts questions answered under that mode.
    fn compute(
        &self,
        answers: &AnswerStore<ChartResponse>,
        catalog: &Catalog<ChartQuestion>,
    ) -> Result<ScoreResult, QuizError> {
        ensure_known(answers, catalog)?;
        let total = count_u32(catalog.len());
        if answers.is_empty() {
            return Ok(ScoreResult::no_data(QuizKind::Chart, total).classified(&self.policy));
        }

        let mut groups: BTreeMap<DisplayMode, (u32, u32)> = BTreeMap::new();
        let rows: Vec<LabelRow> = catalog
            .items()
            .iter()
            .map(|question| {
                let answered = answers.get(&question.id);
                let correct = answered.is_some_and(|a| a.element == question.target);
                if let Some(a) = answered {
                    let group = groups.entry(a.mode).or_default();
                    group.1 += 1;
                    if correct {
                        group.0 += 1;
                    }
                }
                LabelRow {
                    item: question.id.clone(),
                    expected: question.target,
                    answered: answered.map(|a| a.element),
                    mode: answered.map(|a| a.mode),
                    correct,
                }
            })
            .collect();

        let correct = count_u32(rows.iter().filter(|r| r.correct).count());
        let per_mode = groups
            .into_iter()
            .map(|(mode, (c, t))| (mode, GroupAccuracy::new(c, t)))
            .collect();
        tracing::debug!(correct, total, "chart tally");

        let tally = LabelTally {
            correct,
            total,
            per_mode,
            rows,
        };
        Ok(
            ScoreResult::new(QuizKind::Chart, correct, total, ScoreDetail::Labels(tally))
                .classified(&self.policy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::{ItemId, Verdict};

    #[test]
    fn per_mode_grouping_leaves_overall_score_alone() {
        let catalog = catalog::chart();
        let mut store = AnswerStore::for_catalog(&catalog);
        for (i, question) in catalog.items().iter().enumerate() {
            let mode = if i < 3 { DisplayMode::Day } else { DisplayMode::Night };
            store
                .set(&question.id, ChartResponse::new(question.target, mode))
                .unwrap();
        }
        // chart-4 targets depth contours; answer it wrongly at night.
        store
            .set(
                &ItemId::from("chart-4"),
                ChartResponse::new(ChartElement::Sea, DisplayMode::Night),
            )
            .unwrap();

        let result = ChartScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.raw, 5);
        assert_eq!(result.max, 6);
        let ScoreDetail::Labels(tally) = &result.detail else {
            panic!("expected label detail");
        };
        let day = &tally.per_mode[&DisplayMode::Day];
        assert_eq!((day.correct, day.total), (3, 3));
        let night = &tally.per_mode[&DisplayMode::Night];
        assert_eq!((night.correct, night.total), (2, 3));
        assert!(!tally.per_mode.contains_key(&DisplayMode::Dusk));
        // 5/6 = 83.3%
        assert_eq!(result.verdict, Verdict::Adequate);
    }

    #[test]
    fn accuracy_tiers() {
        let catalog = catalog::chart();
        let mut store = AnswerStore::for_catalog(&catalog);
        for question in catalog.items() {
            store
                .set(&question.id, ChartResponse::new(question.target, DisplayMode::Dusk))
                .unwrap();
        }
        let scorer = ChartScorer::default();
        assert_eq!(scorer.compute(&store, &catalog).unwrap().verdict, Verdict::Excellent);

        store.clear(&ItemId::from("chart-1"));
        store.clear(&ItemId::from("chart-2"));
        // 4/6 = 66.7%, unanswered questions count against the total.
        assert_eq!(
            scorer.compute(&store, &catalog).unwrap().verdict,
            Verdict::NeedsImprovement
        );
    }

    #[test]
    fn response_parsing_with_mode() {
        let plain = ChartResponse::parse("Navigation Aids", DisplayMode::Dusk).unwrap();
        assert_eq!(plain, ChartResponse::new(ChartElement::NavigationAids, DisplayMode::Dusk));
        let tagged = ChartResponse::parse("danger @ night", DisplayMode::Day).unwrap();
        assert_eq!(tagged, ChartResponse::new(ChartElement::Danger, DisplayMode::Night));
        assert!(ChartResponse::parse("danger@noon", DisplayMode::Day).is_err());
    }

    #[test]
    fn text_is_not_a_valid_answer() {
        let catalog = catalog::chart();
        let question = &catalog.items()[0];
        let err = ChartScorer::default()
            .check(question, &ChartResponse::new(ChartElement::Text, DisplayMode::Day))
            .unwrap_err();
        assert!(err.is_input_error());
    }
}
