//! Composite scoring for the radar colour discrimination battery.
//!
//! Each subtest yields a bounded sub-score; the battery total is their sum
//! and the battery maximum is the sum of the subtest maxima. Count estimates
//! earn partial credit: `max(0, ceiling - |estimate - true count|)`.

use serde::{Deserialize, Serialize};

use crate::answers::AnswerStore;
use crate::assessment::AssessmentPolicy;
use crate::catalog::{Catalog, ProbeStimulus, RadarProbe, RadarSubtest, Swatch};
use crate::error::QuizError;
use crate::model::QuizKind;
use crate::traits::{Response, Scorer};

use super::ordering::{arrangement_from_store, positional_matches};
use super::{count_u32, ensure_known, CompositeTally, ScoreDetail, ScoreResult, SubtestScore};

/// Answer to one radar probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadarResponse {
    /// Yes/no: "the same" for same/different probes, "target seen" for
    /// contrast probes.
    Judgement(bool),
    /// Estimated number of targets.
    Count(u32),
}

impl Response for RadarResponse {}

impl RadarResponse {
    /// Parse raw text into the response shape `probe` expects.
    pub fn parse_for(probe: &RadarProbe, input: &str) -> Result<Self, QuizError> {
        match probe.stimulus {
            ProbeStimulus::CountEstimate { .. } => parse_count(input).map(RadarResponse::Count),
            _ => parse_judgement(input).map(RadarResponse::Judgement),
        }
    }
}

/// Parse a target count. Negative and non-numeric input is rejected here so
/// the scorer only ever sees valid counts.
pub fn parse_count(input: &str) -> Result<u32, QuizError> {
    let trimmed = input.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| QuizError::invalid_input(input, "count must be a whole number"))?;
    if value < 0 {
        return Err(QuizError::invalid_input(input, "count cannot be negative"));
    }
    u32::try_from(value).map_err(|_| QuizError::invalid_input(input, "count is too large"))
}

/// Parse a yes/no answer (`yes`, `y`, `same`, `true` / `no`, `n`,
/// `different`, `false`).
pub fn parse_judgement(input: &str) -> Result<bool, QuizError> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" | "same" | "true" => Ok(true),
        "no" | "n" | "different" | "diff" | "false" => Ok(false),
        _ => Err(QuizError::invalid_input(input, "expected yes or no")),
    }
}

/// Scores the probe subtests and, when given, the intensity ordering.
#[derive(Debug, Clone, Default)]
pub struct RadarScorer {
    policy: AssessmentPolicy,
}

impl RadarScorer {
    pub fn new(policy: AssessmentPolicy) -> Self {
        Self { policy }
    }

    /// Partial credit for one count estimate.
    pub fn count_credit(&self, estimate: u32, true_count: u32) -> u32 {
        self.policy
            .radar
            .count_ceiling
            .saturating_sub(estimate.abs_diff(true_count))
    }

    /// Points `response` earns on `probe`, out of the probe's maximum.
    fn probe_points(&self, probe: &RadarProbe, response: Option<&RadarResponse>) -> u32 {
        match (&probe.stimulus, response) {
            (ProbeStimulus::SameDifferent { first, second }, Some(RadarResponse::Judgement(same))) => {
                u32::from(*same == first.eq_ignore_ascii_case(second))
            }
            (ProbeStimulus::Contrast { present, .. }, Some(RadarResponse::Judgement(seen))) => {
                u32::from(seen == present)
            }
            (ProbeStimulus::CountEstimate { true_count }, Some(RadarResponse::Count(estimate))) => {
                self.count_credit(*estimate, *true_count)
            }
            _ => 0,
        }
    }

    fn probe_max(&self, probe: &RadarProbe) -> u32 {
        match probe.stimulus {
            ProbeStimulus::CountEstimate { .. } => self.policy.radar.count_ceiling,
            _ => 1,
        }
    }

    /// Score the full battery. `ordering` is the intensity arrangement and
    /// its scale; without it only the probe subtests are scored.
    pub fn score_battery(
        &self,
        answers: &AnswerStore<RadarResponse>,
        probes: &Catalog<RadarProbe>,
        ordering: Option<(&AnswerStore<usize>, &Catalog<Swatch>)>,
    ) -> Result<ScoreResult, QuizError> {
        ensure_known(answers, probes)?;
        let ordering_answered = ordering.is_some_and(|(placed, _)| !placed.is_empty());
        if answers.is_empty() && !ordering_answered {
            let max = self.battery_max(probes, ordering.map(|(_, scale)| scale.len()));
            return Ok(ScoreResult::no_data(QuizKind::Radar, max).classified(&self.policy));
        }

        let mut subtests: Vec<SubtestScore> = Vec::new();
        for subtest in [
            RadarSubtest::SameDifferent,
            RadarSubtest::Contrast,
            RadarSubtest::CountEstimate,
        ] {
            let mut entry = SubtestScore {
                subtest,
                score: 0,
                max: 0,
            };
            for probe in probes.items().iter().filter(|p| p.subtest() == subtest) {
                entry.score += self.probe_points(probe, answers.get(&probe.id));
                entry.max += self.probe_max(probe);
            }
            if entry.max > 0 {
                subtests.push(entry);
            }
        }

        if let Some((placed, scale)) = ordering {
            let score = if placed.is_empty() {
                0
            } else {
                ensure_known(placed, scale)?;
                positional_matches(&arrangement_from_store(placed, scale)?)
            };
            subtests.push(SubtestScore {
                subtest: RadarSubtest::Ordering,
                score,
                max: count_u32(scale.len()),
            });
        }

        let raw: u32 = subtests.iter().map(|s| s.score).sum();
        let max: u32 = subtests.iter().map(|s| s.max).sum();
        tracing::debug!(raw, max, subtests = subtests.len(), "radar tally");
        let detail = ScoreDetail::Composite(CompositeTally { subtests });
        Ok(ScoreResult::new(QuizKind::Radar, raw, max, detail).classified(&self.policy))
    }

    fn battery_max(&self, probes: &Catalog<RadarProbe>, scale_len: Option<usize>) -> u32 {
        let probe_max: u32 = probes.items().iter().map(|p| self.probe_max(p)).sum();
        probe_max + scale_len.map(count_u32).unwrap_or(0)
    }
}

impl Scorer for RadarScorer {
    type Item = RadarProbe;
    type Response = RadarResponse;

    fn quiz(&self) -> QuizKind {
        QuizKind::Radar
    }

    fn check(&self, probe: &RadarProbe, response: &RadarResponse) -> Result<(), QuizError> {
        let fits = matches!(
            (&probe.stimulus, response),
            (ProbeStimulus::CountEstimate { .. }, RadarResponse::Count(_))
                | (ProbeStimulus::SameDifferent { .. }, RadarResponse::Judgement(_))
                | (ProbeStimulus::Contrast { .. }, RadarResponse::Judgement(_))
        );
        if fits {
            Ok(())
        } else {
            Err(QuizError::ResponseMismatch {
                item: probe.id.clone(),
                reason: format!("{} probes take a different kind of answer", probe.subtest()),
            })
        }
    }

    fn compute(
        &self,
        answers: &AnswerStore<RadarResponse>,
        catalog: &Catalog<RadarProbe>,
    ) -> Result<ScoreResult, QuizError> {
        self.score_battery(answers, catalog, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::model::{ItemId, Verdict};

    fn truthful(probes: &Catalog<RadarProbe>) -> AnswerStore<RadarResponse> {
        let mut store = AnswerStore::for_catalog(probes);
        for probe in probes.items() {
            let response = match &probe.stimulus {
                ProbeStimulus::SameDifferent { first, second } => {
                    RadarResponse::Judgement(first == second)
                }
                ProbeStimulus::Contrast { present, .. } => RadarResponse::Judgement(*present),
                ProbeStimulus::CountEstimate { true_count } => RadarResponse::Count(*true_count),
            };
            store.set(&probe.id, response).unwrap();
        }
        store
    }

    fn in_order(scale: &Catalog<Swatch>) -> AnswerStore<usize> {
        let mut store = AnswerStore::for_catalog(scale);
        for (slot, swatch) in scale.items().iter().enumerate() {
            store.set(&swatch.id, slot).unwrap();
        }
        store
    }

    #[test]
    fn count_credit_is_partial() {
        let scorer = RadarScorer::default();
        assert_eq!(scorer.count_credit(3, 3), 5);
        assert_eq!(scorer.count_credit(5, 3), 3);
        assert_eq!(scorer.count_credit(1, 3), 3);
        assert_eq!(scorer.count_credit(10, 3), 0);
    }

    #[test]
    fn count_input_is_validated_at_the_boundary() {
        assert_eq!(parse_count(" 7 ").unwrap(), 7);
        assert!(parse_count("-1").unwrap_err().is_input_error());
        assert!(parse_count("seven").unwrap_err().is_input_error());
        assert!(parse_count("2.5").is_err());
    }

    #[test]
    fn judgement_parsing() {
        assert!(parse_judgement("Yes").unwrap());
        assert!(parse_judgement("same").unwrap());
        assert!(!parse_judgement(" n ").unwrap());
        assert!(parse_judgement("maybe").is_err());
    }

    #[test]
    fn perfect_battery_with_ordering() {
        let probes = catalog::radar_probes();
        let scale = catalog::radar_intensity_scale();
        let answers = truthful(&probes);
        let placed = in_order(&scale);
        let result = RadarScorer::default()
            .score_battery(&answers, &probes, Some((&placed, &scale)))
            .unwrap();

        // 4 same/different + 4 contrast + 2 * 5 count + 6 ordering
        assert_eq!(result.max, 24);
        assert_eq!(result.raw, 24);
        assert_eq!(result.verdict, Verdict::Pass);
        let ScoreDetail::Composite(tally) = &result.detail else {
            panic!("expected composite detail");
        };
        assert_eq!(tally.subtests.len(), 4);
        assert_eq!(tally.subtest(RadarSubtest::Ordering).unwrap().score, 6);
    }

    #[test]
    fn overall_is_sum_of_subtests() {
        let probes = catalog::radar_probes();
        let mut answers = truthful(&probes);
        // true count 3, estimate 5 -> 3 of 5
        answers.set(&ItemId::from("radar-count-1"), RadarResponse::Count(5)).unwrap();
        // wrong judgement on an identical pair
        answers
            .set(&ItemId::from("radar-same-1"), RadarResponse::Judgement(false))
            .unwrap();

        let result = RadarScorer::default().compute(&answers, &probes).unwrap();
        let ScoreDetail::Composite(tally) = &result.detail else {
            panic!("expected composite detail");
        };
        let sum: u32 = tally.subtests.iter().map(|s| s.score).sum();
        assert_eq!(result.raw, sum);
        assert_eq!(tally.subtest(RadarSubtest::CountEstimate).unwrap().score, 8);
        assert_eq!(tally.subtest(RadarSubtest::SameDifferent).unwrap().score, 3);
        assert!(tally.subtest(RadarSubtest::Ordering).is_none());
        assert_eq!(result.max, 18);
        assert_eq!(result.raw, 15);
    }

    #[test]
    fn mismatched_response_is_rejected() {
        let probes = catalog::radar_probes();
        let count_probe = probes.get(&ItemId::from("radar-count-1")).unwrap();
        let scorer = RadarScorer::default();
        assert!(scorer
            .check(count_probe, &RadarResponse::Judgement(true))
            .is_err());
        assert!(scorer.check(count_probe, &RadarResponse::Count(2)).is_ok());
        assert!(RadarResponse::parse_for(count_probe, "yes").is_err());
    }

    #[test]
    fn scrambled_ordering_drags_the_verdict() {
        let probes = catalog::radar_probes();
        let scale = catalog::radar_intensity_scale();
        let answers = AnswerStore::for_catalog(&probes);
        let mut placed = AnswerStore::for_catalog(&scale);
        for (slot, swatch) in scale.items().iter().rev().enumerate() {
            placed.set(&swatch.id, slot).unwrap();
        }
        let result = RadarScorer::default()
            .score_battery(&answers, &probes, Some((&placed, &scale)))
            .unwrap();
        assert_eq!(result.raw, 0);
        assert_eq!(result.max, 24);
        assert_eq!(result.verdict, Verdict::Fail);
    }

    #[test]
    fn nothing_answered_is_insufficient_data() {
        let probes = catalog::radar_probes();
        let scale = catalog::radar_intensity_scale();
        let answers = AnswerStore::for_catalog(&probes);
        let placed = AnswerStore::for_catalog(&scale);
        let result = RadarScorer::default()
            .score_battery(&answers, &probes, Some((&placed, &scale)))
            .unwrap();
        assert_eq!(result.max, 24);
        assert_eq!(result.verdict, Verdict::InsufficientData);
    }
}
