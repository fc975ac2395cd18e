//! Session reports with JSON persistence and markdown rendering.
//!
//! A [`SessionReport`] is a read-only snapshot of every quiz a participant
//! completed. Certificate renderers consume it; nothing here knows about
//! document formats beyond plain markdown.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{QuizKind, Verdict};
use crate::scoring::{ScoreDetail, ScoreResult};

/// Scores from one sitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub participant: Option<String>,
    /// One entry per completed quiz, in the order they were taken.
    pub outcomes: Vec<QuizOutcome>,
}

/// The final score of one quiz within a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub quiz: QuizKind,
    /// Where the answers came from: a session id or a sheet path.
    pub source: String,
    pub completed_at: DateTime<Utc>,
    pub result: ScoreResult,
}

impl QuizOutcome {
    pub fn new(source: impl Into<String>, result: ScoreResult) -> Self {
        Self {
            quiz: result.quiz,
            source: source.into(),
            completed_at: Utc::now(),
            result,
        }
    }
}

impl SessionReport {
    pub fn new(participant: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            participant,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: QuizOutcome) {
        self.outcomes.push(outcome);
    }

    /// The latest outcome for `quiz`, if it was taken.
    pub fn outcome(&self, quiz: QuizKind) -> Option<&QuizOutcome> {
        self.outcomes.iter().rev().find(|o| o.quiz == quiz)
    }

    /// True when every outcome has a passing verdict. An empty report does
    /// not pass.
    pub fn all_passing(&self) -> bool {
        !self.outcomes.is_empty() && self.outcomes.iter().all(|o| o.result.verdict.is_passing())
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Colour Vision Assessment\n\n");
        if let Some(name) = &self.participant {
            md.push_str(&format!("**Participant:** {name}\n\n"));
        }
        md.push_str(&format!(
            "**Date:** {}\n\n",
            self.created_at.format("%Y-%m-%d %H:%M UTC")
        ));

        if self.outcomes.is_empty() {
            md.push_str("No quizzes completed.\n");
            return md;
        }

        md.push_str("| Quiz | Score | Accuracy | Verdict |\n");
        md.push_str("|------|-------|----------|---------|\n");
        for outcome in &self.outcomes {
            let r = &outcome.result;
            md.push_str(&format!(
                "| {} | {} | {:.1}% | {} |\n",
                outcome.quiz.title(),
                score_cell(r),
                r.accuracy,
                r.verdict.label()
            ));
        }
        md.push('\n');

        for outcome in &self.outcomes {
            let section = detail_markdown(&outcome.result);
            if !section.is_empty() {
                md.push_str(&format!("## {}\n\n", outcome.quiz.title()));
                md.push_str(&section);
                md.push('\n');
            }
        }

        md
    }
}

fn score_cell(result: &ScoreResult) -> String {
    match &result.detail {
        ScoreDetail::RankDistance(t) => {
            format!("error {} (min {}, max {})", t.error_sum, t.minimum, t.maximum)
        }
        _ => format!("{}/{}", result.raw, result.max),
    }
}

fn detail_markdown(result: &ScoreResult) -> String {
    let mut md = String::new();
    match &result.detail {
        ScoreDetail::Categories(tally) => {
            for (category, count) in &tally.counts {
                md.push_str(&format!("- {category}: {count}/{} plates\n", tally.plates));
            }
        }
        ScoreDetail::Pairs(tally) => {
            let wrong: Vec<_> = tally.rows.iter().filter(|r| !r.correct).collect();
            if !wrong.is_empty() {
                md.push_str("| Pair | Shown | Answered |\n");
                md.push_str("|------|-------|----------|\n");
                for row in wrong {
                    let answered = row
                        .answered
                        .map(|(a, b)| format!("{a} / {b}"))
                        .unwrap_or_else(|| "-".into());
                    md.push_str(&format!(
                        "| {} | {} / {} | {} |\n",
                        row.item, row.expected.0, row.expected.1, answered
                    ));
                }
            }
        }
        ScoreDetail::Labels(tally) => {
            for (mode, group) in &tally.per_mode {
                md.push_str(&format!(
                    "- {mode}: {}/{} ({:.1}%)\n",
                    group.correct, group.total, group.accuracy
                ));
            }
        }
        ScoreDetail::Composite(tally) => {
            for s in &tally.subtests {
                md.push_str(&format!("- {}: {}/{}\n", s.subtest, s.score, s.max));
            }
        }
        ScoreDetail::RankDistance(_) | ScoreDetail::Positional(_) | ScoreDetail::NoData => {}
    }
    md
}

/// Tally of verdicts across several reports, for batch scoring summaries.
pub fn verdict_counts<'a>(results: impl IntoIterator<Item = &'a ScoreResult>) -> Vec<(Verdict, usize)> {
    let mut counts: Vec<(Verdict, usize)> = Vec::new();
    for result in results {
        match counts.iter_mut().find(|(v, _)| *v == result.verdict) {
            Some((_, n)) => *n += 1,
            None => counts.push((result.verdict, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerStore;
    use crate::catalog::{self, LightColor};
    use crate::scoring::{LanternResponse, LanternScorer, PositionalTally};
    use crate::traits::Scorer;

    fn lantern_result(wrong: usize) -> ScoreResult {
        let catalog = catalog::lantern();
        let mut store = AnswerStore::for_catalog(&catalog);
        for (i, pair) in catalog.items().iter().enumerate() {
            let response = if i < wrong {
                LanternResponse::new(LightColor::White, LightColor::White)
            } else {
                LanternResponse::new(pair.first, pair.second)
            };
            store.set(&pair.id, response).unwrap();
        }
        LanternScorer::default().compute(&store, &catalog).unwrap()
    }

    fn hue_result() -> ScoreResult {
        ScoreResult::new(
            QuizKind::Hue,
            6,
            8,
            ScoreDetail::Positional(PositionalTally { matches: 6, total: 8 }),
        )
    }

    #[test]
    fn json_roundtrip() {
        let mut report = SessionReport::new(Some("Deck Cadet".into()));
        report.push(QuizOutcome::new("session", lantern_result(1)));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");

        report.save_json(&path).unwrap();
        let loaded = SessionReport::load_json(&path).unwrap();

        assert_eq!(loaded.id, report.id);
        assert_eq!(loaded.participant.as_deref(), Some("Deck Cadet"));
        assert_eq!(loaded.outcomes.len(), 1);
        assert_eq!(loaded.outcomes[0].result, report.outcomes[0].result);
    }

    #[test]
    fn load_missing_file_names_path() {
        let err = SessionReport::load_json(Path::new("/nonexistent/report.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/report.json"));
    }

    #[test]
    fn markdown_lists_wrong_pairs() {
        let mut report = SessionReport::new(None);
        report.push(QuizOutcome::new("session", lantern_result(1)));
        report.push(QuizOutcome::new("sheet.toml", hue_result()));
        let md = report.to_markdown();
        assert!(md.contains("| Lantern"));
        assert!(md.contains("8/9"));
        assert!(md.contains("pair-1"));
        assert!(md.contains("white / white"));
        assert!(!md.contains("pair-2 |"));
    }

    #[test]
    fn empty_report() {
        let report = SessionReport::new(None);
        assert!(!report.all_passing());
        assert!(report.to_markdown().contains("No quizzes completed"));
    }

    #[test]
    fn passing_and_latest_outcome() {
        let mut report = SessionReport::new(None);
        report.push(QuizOutcome::new("first", lantern_result(3)));
        assert!(!report.all_passing());
        report.push(QuizOutcome::new("second", lantern_result(0)));
        assert_eq!(report.outcome(QuizKind::Lantern).unwrap().source, "second");
        assert!(report.outcome(QuizKind::Chart).is_none());
    }

    #[test]
    fn verdicts_are_counted() {
        let results = [lantern_result(0), lantern_result(1), lantern_result(4)];
        let counts = verdict_counts(&results);
        assert_eq!(counts, vec![(Verdict::Pass, 2), (Verdict::Fail, 1)]);
    }
}
