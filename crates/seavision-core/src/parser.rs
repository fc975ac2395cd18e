//! TOML answer sheet parser.
//!
//! An answer sheet records one participant's responses to one quiz so it can
//! be scored without an interactive session:
//!
//! ```toml
//! [sheet]
//! quiz = "lantern"
//! participant = "A. Mariner"
//!
//! [answers]
//! pair-1 = "red green"
//! pair-2 = "red white"
//! ```
//!
//! Hue sheets list the arranged swatches in `sheet.order`; radar sheets put
//! the intensity arrangement there.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::answers::AnswerStore;
use crate::assessment::AssessmentPolicy;
use crate::catalog::{self, Catalog, DisplayMode, IshiharaPlate, Swatch};
use crate::error::QuizError;
use crate::model::{ItemId, QuizKind};
use crate::scoring::{
    ChartResponse, ChartScorer, HueScorer, HueSet, IshiharaScorer, LanternResponse, LanternScorer,
    OrderingMode, RadarResponse, RadarScorer, ScoreResult,
};
use crate::traits::{QuizItem, Response, Scorer};

#[derive(Debug, Deserialize)]
struct TomlSheetFile {
    sheet: TomlSheetHeader,
    #[serde(default)]
    answers: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct TomlSheetHeader {
    quiz: String,
    #[serde(default)]
    participant: Option<String>,
    #[serde(default)]
    plates: Option<Vec<u32>>,
    #[serde(default)]
    set: Option<String>,
    #[serde(default)]
    mode: Option<String>,
    #[serde(default)]
    display_mode: Option<String>,
    #[serde(default)]
    order: Vec<String>,
}

/// One participant's recorded responses to one quiz.
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    /// File the sheet was read from.
    pub source: PathBuf,
    pub quiz: QuizKind,
    pub participant: Option<String>,
    /// Ishihara plate subset the sheet was taken on. `None` means all plates.
    pub plates: Option<Vec<u32>>,
    /// Swatch set for hue sheets.
    pub hue_set: HueSet,
    /// Explicit hue scoring mode; otherwise the set's own.
    pub ordering_mode: Option<OrderingMode>,
    /// Mode assumed for chart answers that do not name one.
    pub display_mode: DisplayMode,
    /// Raw responses keyed by item id.
    pub answers: BTreeMap<String, String>,
    /// Arrangement, first slot first.
    pub order: Vec<String>,
}

impl AnswerSheet {
    pub fn ordering_mode(&self) -> OrderingMode {
        self.ordering_mode
            .unwrap_or_else(|| self.hue_set.default_mode())
    }

    /// Short label for listings: the file stem, or the participant.
    pub fn label(&self) -> String {
        self.participant.clone().unwrap_or_else(|| {
            self.source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.source.display().to_string())
        })
    }
}

/// Parse a single answer sheet file.
pub fn parse_sheet(path: &Path) -> Result<AnswerSheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer sheet: {}", path.display()))?;

    parse_sheet_str(&content, path)
}

/// Parse answer sheet TOML from a string (useful for testing).
pub fn parse_sheet_str(content: &str, source_path: &Path) -> Result<AnswerSheet> {
    let parsed: TomlSheetFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    let header = parsed.sheet;

    let quiz: QuizKind = header
        .quiz
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let hue_set = header
        .set
        .as_deref()
        .map(str::parse::<HueSet>)
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?
        .unwrap_or_default();
    let ordering_mode = header
        .mode
        .as_deref()
        .map(str::parse::<OrderingMode>)
        .transpose()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let display_mode = header
        .display_mode
        .as_deref()
        .map(str::parse::<DisplayMode>)
        .transpose()?
        .unwrap_or(DisplayMode::Day);

    Ok(AnswerSheet {
        source: source_path.to_path_buf(),
        quiz,
        participant: header.participant,
        plates: header.plates,
        hue_set,
        ordering_mode,
        display_mode,
        answers: parsed.answers,
        order: header.order,
    })
}

/// Recursively load all `.toml` answer sheets from a directory.
pub fn load_sheet_directory(dir: &Path) -> Result<Vec<AnswerSheet>> {
    let mut sheets = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            sheets.extend(load_sheet_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_sheet(&path) {
                Ok(sheet) => sheets.push(sheet),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(sheets)
}

// ---------------------------------------------------------------------------
// Building answer stores
// ---------------------------------------------------------------------------

/// Answers parsed from a sheet, plus every item-level problem found on the
/// way.
struct Collected<R> {
    store: AnswerStore<R>,
    problems: Vec<(Option<String>, QuizError)>,
}

impl<R> Collected<R> {
    fn into_store(self) -> Result<AnswerStore<R>> {
        match self.problems.into_iter().next() {
            Some((Some(item), err)) => Err(anyhow::Error::new(err).context(format!("item '{item}'"))),
            Some((None, err)) => Err(err.into()),
            None => Ok(self.store),
        }
    }
}

fn collect_answers<S, F>(
    sheet: &AnswerSheet,
    scorer: &S,
    catalog: &Catalog<S::Item>,
    parse: F,
) -> Collected<S::Response>
where
    S: Scorer,
    F: Fn(&S::Item, &str) -> Result<S::Response, QuizError>,
{
    let mut store = AnswerStore::for_catalog(catalog);
    let mut problems = Vec::new();
    for (raw_id, raw) in &sheet.answers {
        let id = ItemId::from(raw_id.as_str());
        let outcome = catalog.get(&id).and_then(|item| {
            let response = parse(item, raw.as_str())?;
            scorer.check(item, &response)?;
            store.set(&id, response)
        });
        if let Err(e) = outcome {
            problems.push((Some(raw_id.clone()), e));
        }
    }
    Collected { store, problems }
}

/// Placements (swatch -> slot) from an arrangement list.
fn collect_order(order: &[String], catalog: &Catalog<Swatch>) -> Collected<usize> {
    let mut store = AnswerStore::for_catalog(catalog);
    let mut problems = Vec::new();
    let mut seen = HashSet::new();
    for (slot, raw_id) in order.iter().enumerate() {
        let id = ItemId::from(raw_id.as_str());
        if !seen.insert(id.clone()) {
            problems.push((
                Some(raw_id.clone()),
                QuizError::InvalidArrangement(format!("'{raw_id}' is listed more than once")),
            ));
            continue;
        }
        if let Err(e) = store.set(&id, slot) {
            problems.push((Some(raw_id.clone()), e));
        }
    }
    if !order.is_empty() && order.len() != catalog.len() {
        problems.push((
            None,
            QuizError::InvalidArrangement(format!(
                "order lists {} swatches, expected {}",
                order.len(),
                catalog.len()
            )),
        ));
    }
    Collected { store, problems }
}

fn ishihara_catalog(sheet: &AnswerSheet) -> Result<Arc<Catalog<IshiharaPlate>>, QuizError> {
    let full = catalog::ishihara();
    match &sheet.plates {
        None => Ok(full),
        Some(numbers) => {
            let ids: Vec<ItemId> = numbers.iter().map(|&n| IshiharaPlate::plate_id(n)).collect();
            Ok(Arc::new(full.subset(ids.iter())?))
        }
    }
}

fn unanswered<T: QuizItem, R: Response>(catalog: &Catalog<T>, store: &AnswerStore<R>) -> Vec<String> {
    catalog
        .ids()
        .filter(|id| store.get(id).is_none())
        .map(|id| id.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A warning from answer sheet validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The item the warning is about, if any.
    pub item: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn sheet(message: impl Into<String>) -> Self {
        Self {
            item: None,
            message: message.into(),
        }
    }
}

fn push_problems<R>(warnings: &mut Vec<ValidationWarning>, collected: &Collected<R>) {
    for (item, err) in &collected.problems {
        warnings.push(ValidationWarning {
            item: item.clone(),
            message: err.to_string(),
        });
    }
}

fn push_unanswered(warnings: &mut Vec<ValidationWarning>, missing: Vec<String>, what: &str) {
    for id in missing {
        warnings.push(ValidationWarning {
            item: Some(id),
            message: format!("{what} has no answer and will be scored as wrong"),
        });
    }
}

/// Validate an answer sheet for common issues: unknown items, unanswered
/// items, malformed responses and arrangements that are not permutations.
pub fn validate_sheet(sheet: &AnswerSheet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let policy = AssessmentPolicy::default();

    match sheet.quiz {
        QuizKind::Ishihara => match ishihara_catalog(sheet) {
            Ok(catalog) => {
                let scorer = IshiharaScorer::new(policy);
                let collected = collect_answers(sheet, &scorer, &catalog, |_, raw| Ok(raw.to_string()));
                push_problems(&mut warnings, &collected);
                for id in unanswered(&catalog, &collected.store) {
                    warnings.push(ValidationWarning {
                        item: Some(id),
                        message: "plate has no answer and will be read as blank".into(),
                    });
                }
            }
            Err(e) => warnings.push(ValidationWarning::sheet(format!("plates: {e}"))),
        },
        QuizKind::Lantern => {
            let catalog = catalog::lantern();
            let scorer = LanternScorer::new(policy);
            let collected = collect_answers(sheet, &scorer, &catalog, |_, raw| raw.parse::<LanternResponse>());
            push_problems(&mut warnings, &collected);
            push_unanswered(&mut warnings, unanswered(&catalog, &collected.store), "pair");
        }
        QuizKind::Chart => {
            let catalog = catalog::chart();
            let scorer = ChartScorer::new(policy);
            let mode = sheet.display_mode;
            let collected = collect_answers(sheet, &scorer, &catalog, |_, raw| ChartResponse::parse(raw, mode));
            push_problems(&mut warnings, &collected);
            push_unanswered(&mut warnings, unanswered(&catalog, &collected.store), "question");
        }
        QuizKind::Hue => {
            if !sheet.answers.is_empty() {
                warnings.push(ValidationWarning::sheet(
                    "hue sheets are scored from sheet.order; [answers] is ignored",
                ));
            }
            if sheet.order.is_empty() {
                warnings.push(ValidationWarning::sheet("sheet.order is empty"));
            }
            let collected = collect_order(&sheet.order, &sheet.hue_set.catalog());
            push_problems(&mut warnings, &collected);
        }
        QuizKind::Radar => {
            let probes = catalog::radar_probes();
            let scorer = RadarScorer::new(policy);
            let collected = collect_answers(sheet, &scorer, &probes, RadarResponse::parse_for);
            push_problems(&mut warnings, &collected);
            push_unanswered(&mut warnings, unanswered(&probes, &collected.store), "probe");
            if sheet.order.is_empty() {
                warnings.push(ValidationWarning::sheet(
                    "sheet.order is empty; the intensity ordering subtest will score zero",
                ));
            } else {
                let ordering = collect_order(&sheet.order, &catalog::radar_intensity_scale());
                push_problems(&mut warnings, &ordering);
            }
        }
    }

    if sheet.quiz != QuizKind::Hue && sheet.quiz != QuizKind::Radar && !sheet.order.is_empty() {
        warnings.push(ValidationWarning::sheet(format!(
            "sheet.order is ignored for {} sheets",
            sheet.quiz
        )));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score an answer sheet. Any malformed response or unknown item fails the
/// whole sheet; run [`validate_sheet`] first for a full list.
pub fn score_sheet(sheet: &AnswerSheet, policy: &AssessmentPolicy) -> Result<ScoreResult> {
    let context = || format!("failed to score sheet: {}", sheet.source.display());
    let result = match sheet.quiz {
        QuizKind::Ishihara => {
            let catalog = ishihara_catalog(sheet).with_context(context)?;
            let scorer = IshiharaScorer::new(policy.clone());
            let store = collect_answers(sheet, &scorer, &catalog, |_, raw| Ok(raw.to_string()))
                .into_store()
                .with_context(context)?;
            scorer.compute(&store, &catalog)
        }
        QuizKind::Lantern => {
            let catalog = catalog::lantern();
            let scorer = LanternScorer::new(policy.clone());
            let store = collect_answers(sheet, &scorer, &catalog, |_, raw| raw.parse::<LanternResponse>())
                .into_store()
                .with_context(context)?;
            scorer.compute(&store, &catalog)
        }
        QuizKind::Chart => {
            let catalog = catalog::chart();
            let scorer = ChartScorer::new(policy.clone());
            let mode = sheet.display_mode;
            let store = collect_answers(sheet, &scorer, &catalog, |_, raw| ChartResponse::parse(raw, mode))
                .into_store()
                .with_context(context)?;
            scorer.compute(&store, &catalog)
        }
        QuizKind::Hue => {
            let catalog = sheet.hue_set.catalog();
            let scorer = HueScorer::new(sheet.ordering_mode(), policy.clone());
            let store = collect_order(&sheet.order, &catalog)
                .into_store()
                .with_context(context)?;
            scorer.compute(&store, &catalog)
        }
        QuizKind::Radar => {
            let probes = catalog::radar_probes();
            let scale = catalog::radar_intensity_scale();
            let scorer = RadarScorer::new(policy.clone());
            let store = collect_answers(sheet, &scorer, &probes, RadarResponse::parse_for)
                .into_store()
                .with_context(context)?;
            let placed = collect_order(&sheet.order, &scale)
                .into_store()
                .with_context(context)?;
            scorer.score_battery(&store, &probes, Some((&placed, &scale)))
        }
    };
    result.with_context(context)
}
