//! The `seavision score` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use seavision_core::config::load_config_from;
use seavision_core::parser::{self, AnswerSheet};
use seavision_core::report::{verdict_counts, QuizOutcome, SessionReport};
use seavision_core::scoring::ScoreResult;

use super::render;

/// One scored sheet in JSON output.
#[derive(Debug, Serialize)]
struct SheetScore<'a> {
    sheet: String,
    participant: Option<&'a str>,
    result: &'a ScoreResult,
}

pub fn execute(sheet_path: PathBuf, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let sheets = if sheet_path.is_dir() {
        parser::load_sheet_directory(&sheet_path)?
    } else {
        vec![parser::parse_sheet(&sheet_path)?]
    };

    let mut scored: Vec<(&AnswerSheet, ScoreResult)> = Vec::new();
    let mut failed = 0usize;
    for sheet in &sheets {
        match parser::score_sheet(sheet, &config.thresholds) {
            Ok(result) => scored.push((sheet, result)),
            Err(e) if sheets.len() > 1 => {
                eprintln!("  skipping {}: {e:#}", sheet.source.display());
                failed += 1;
            }
            Err(e) => return Err(e),
        }
    }

    match format.as_str() {
        "json" => {
            let out: Vec<SheetScore<'_>> = scored
                .iter()
                .map(|(sheet, result)| SheetScore {
                    sheet: sheet.source.display().to_string(),
                    participant: sheet.participant.as_deref(),
                    result,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        "markdown" | "md" => {
            for report in group_reports(&scored).values() {
                println!("{}", report.to_markdown());
            }
        }
        _ => {
            if let [(_, result)] = scored.as_slice() {
                render::print_result(result);
            } else {
                print_table(&scored);
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} sheet(s) could not be scored");
    }
    Ok(())
}

/// One report per participant, outcomes in sheet order.
fn group_reports(scored: &[(&AnswerSheet, ScoreResult)]) -> BTreeMap<Option<String>, SessionReport> {
    let mut reports: BTreeMap<Option<String>, SessionReport> = BTreeMap::new();
    for (sheet, result) in scored {
        reports
            .entry(sheet.participant.clone())
            .or_insert_with(|| SessionReport::new(sheet.participant.clone()))
            .push(QuizOutcome::new(
                sheet.source.display().to_string(),
                result.clone(),
            ));
    }
    reports
}

fn print_table(scored: &[(&AnswerSheet, ScoreResult)]) {
    let mut table = Table::new();
    table.set_header(vec!["Sheet", "Quiz", "Score", "Accuracy", "Verdict"]);

    for (sheet, result) in scored {
        table.add_row(vec![
            Cell::new(sheet.label()),
            Cell::new(result.quiz),
            Cell::new(render::score_cell(result)),
            Cell::new(format!("{:.1}%", result.accuracy)),
            Cell::new(result.verdict.label()),
        ]);
    }

    println!("{table}");

    let counts = verdict_counts(scored.iter().map(|(_, r)| r));
    let summary: Vec<String> = counts
        .iter()
        .map(|(verdict, n)| format!("{n} {}", verdict.label().to_lowercase()))
        .collect();
    if !summary.is_empty() {
        println!("\n{} sheet(s): {}", scored.len(), summary.join(", "));
    }
}
