//! Pair-match scoring for the lantern test.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerStore;
use crate::assessment::AssessmentPolicy;
use crate::catalog::{Catalog, LanternPair, LightColor};
use crate::error::QuizError;
use crate::model::QuizKind;
use crate::traits::{Response, Scorer};

use super::{count_u32, ensure_known, PairRow, PairTally, ScoreDetail, ScoreResult};

/// The colours named for the two lights of one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanternResponse {
    pub first: LightColor,
    pub second: LightColor,
}

impl LanternResponse {
    pub fn new(first: LightColor, second: LightColor) -> Self {
        Self { first, second }
    }

    /// Both lights named correctly. There is no credit for one of two.
    pub fn matches(&self, pair: &LanternPair) -> bool {
        self.first == pair.first && self.second == pair.second
    }
}

impl Response for LanternResponse {}

impl FromStr for LanternResponse {
    type Err = QuizError;

    /// Parses two colour names separated by whitespace, a comma or a slash,
    /// e.g. `red green`, `R/W`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s
            .split(|c: char| c.is_whitespace() || c == ',' || c == '/')
            .filter(|p| !p.is_empty())
            .collect();
        match parts.as_slice() {
            [first, second] => Ok(Self::new(first.parse()?, second.parse()?)),
            _ => Err(QuizError::invalid_input(s, "expected two light colours")),
        }
    }
}

/// Counts fully correct pairs; unanswered pairs count as errors.
#[derive(Debug, Clone, Default)]
pub struct LanternScorer {
    policy: AssessmentPolicy,
}

impl LanternScorer {
    pub fn new(policy: AssessmentPolicy) -> Self {
        Self { policy }
    }
}

impl Scorer for LanternScorer {
    type Item = LanternPair;
    type Response = LanternResponse;

    fn quiz(&self) -> QuizKind {
        QuizKind::Lantern
    }

    fn compute(
        &self,
        answers: &AnswerStore<LanternResponse>,
        catalog: &Catalog<LanternPair>,
    ) -> Result<ScoreResult, QuizError> {
        ensure_known(answers, catalog)?;
        let total = count_u32(catalog.len());
        if answers.is_empty() {
            return Ok(ScoreResult::no_data(QuizKind::Lantern, total).classified(&self.policy));
        }

        let rows: Vec<PairRow> = catalog
            .items()
            .iter()
            .map(|pair| {
                let answered = answers.get(&pair.id);
                PairRow {
                    item: pair.id.clone(),
                    expected: (pair.first, pair.second),
                    answered: answered.map(|a| (a.first, a.second)),
                    correct: answered.is_some_and(|a| a.matches(pair)),
                }
            })
            .collect();
        let correct = count_u32(rows.iter().filter(|r| r.correct).count());
        let errors = total - correct;
        tracing::debug!(correct, errors, total, "lantern tally");

        let tally = PairTally {
            correct,
            errors,
            total,
            rows,
        };
        Ok(
            ScoreResult::new(QuizKind::Lantern, correct, total, ScoreDetail::Pairs(tally))
                .classified(&self.policy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::{ItemId, Verdict};

    fn answer_correctly(catalog: &Catalog<LanternPair>) -> AnswerStore<LanternResponse> {
        let mut store = AnswerStore::for_catalog(catalog);
        for pair in catalog.items() {
            store
                .set(&pair.id, LanternResponse::new(pair.first, pair.second))
                .unwrap();
        }
        store
    }

    #[test]
    fn half_right_pair_scores_nothing() {
        let catalog = catalog::lantern();
        let mut store = answer_correctly(&catalog);
        // pair-1 is red/green; second light named wrongly.
        store
            .set(
                &ItemId::from("pair-1"),
                LanternResponse::new(LightColor::Red, LightColor::Red),
            )
            .unwrap();

        let result = LanternScorer::default().compute(&store, &catalog).unwrap();
        let ScoreDetail::Pairs(tally) = &result.detail else {
            panic!("expected pair detail");
        };
        assert_eq!(tally.correct, 8);
        assert_eq!(tally.errors, 1);
        assert_eq!(tally.total, 9);
        assert!(!tally.rows[0].correct);
        assert_eq!(result.verdict, Verdict::Pass);
    }

    #[test]
    fn two_errors_fail() {
        let catalog = catalog::lantern();
        let mut store = answer_correctly(&catalog);
        store.clear(&ItemId::from("pair-8"));
        store.clear(&ItemId::from("pair-9"));
        let result = LanternScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.raw, 7);
        assert_eq!(result.max, 9);
        assert_eq!(result.verdict, Verdict::Fail);
    }

    #[test]
    fn perfect_run() {
        let catalog = catalog::lantern();
        let store = answer_correctly(&catalog);
        let result = LanternScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.raw, 9);
        assert!((result.accuracy - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.verdict, Verdict::Pass);
    }

    #[test]
    fn response_parsing() {
        let parsed: LanternResponse = "red green".parse().unwrap();
        assert_eq!(parsed, LanternResponse::new(LightColor::Red, LightColor::Green));
        let parsed: LanternResponse = " W / y ".parse().unwrap();
        assert_eq!(parsed, LanternResponse::new(LightColor::White, LightColor::Yellow));
        assert!("red".parse::<LanternResponse>().is_err());
        assert!("red blue".parse::<LanternResponse>().is_err());
        assert!("red green white".parse::<LanternResponse>().is_err());
    }

    #[test]
    fn zero_answers_is_insufficient_data() {
        let catalog = catalog::lantern();
        let store = AnswerStore::for_catalog(&catalog);
        let result = LanternScorer::default().compute(&store, &catalog).unwrap();
        assert_eq!(result.verdict, Verdict::InsufficientData);
    }
}
