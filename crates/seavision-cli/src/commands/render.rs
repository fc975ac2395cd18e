//! Plain-text rendering of score results shared by `take` and `score`.

use comfy_table::{Cell, Table};

use seavision_core::scoring::{ScoreDetail, ScoreResult};

/// `raw/max`, or the error sum for rank-distance scores.
pub fn score_cell(result: &ScoreResult) -> String {
    match &result.detail {
        ScoreDetail::RankDistance(t) => format!("error {} (min {})", t.error_sum, t.minimum),
        _ => format!("{}/{}", result.raw, result.max),
    }
}

pub fn print_result(result: &ScoreResult) {
    println!("\n{}", result.quiz.title());
    println!("  Score:    {}", score_cell(result));
    println!("  Accuracy: {:.1}%", result.accuracy);
    println!("  Verdict:  {}", result.verdict.label());

    match &result.detail {
        ScoreDetail::NoData => println!("  No answers were recorded."),
        ScoreDetail::Categories(tally) => {
            for (category, count) in &tally.counts {
                println!("  {category:<8} {count}/{}", tally.plates);
            }
        }
        ScoreDetail::Pairs(tally) => {
            let mut table = Table::new();
            table.set_header(vec!["Pair", "Shown", "Answered", ""]);
            for row in &tally.rows {
                let answered = row
                    .answered
                    .map(|(a, b)| format!("{a} {b}"))
                    .unwrap_or_else(|| "-".into());
                table.add_row(vec![
                    Cell::new(&row.item),
                    Cell::new(format!("{} {}", row.expected.0, row.expected.1)),
                    Cell::new(answered),
                    Cell::new(if row.correct { "ok" } else { "wrong" }),
                ]);
            }
            println!("{table}");
        }
        ScoreDetail::Labels(tally) => {
            let mut table = Table::new();
            table.set_header(vec!["Question", "Expected", "Answered", "Mode", ""]);
            for row in &tally.rows {
                table.add_row(vec![
                    Cell::new(&row.item),
                    Cell::new(row.expected.label()),
                    Cell::new(row.answered.map(|e| e.label()).unwrap_or("-")),
                    Cell::new(row.mode.map(|m| m.to_string()).unwrap_or_else(|| "-".into())),
                    Cell::new(if row.correct { "ok" } else { "wrong" }),
                ]);
            }
            println!("{table}");
            for (mode, group) in &tally.per_mode {
                println!(
                    "  {mode}: {}/{} ({:.1}%)",
                    group.correct, group.total, group.accuracy
                );
            }
        }
        ScoreDetail::RankDistance(t) => {
            println!(
                "  {} swatches, excess error {} (reverse order scores {}, worst possible {})",
                t.swatches, t.excess, t.reverse_sum, t.maximum
            );
        }
        ScoreDetail::Positional(t) => {
            println!("  {}/{} swatches in the right slot", t.matches, t.total);
        }
        ScoreDetail::Composite(tally) => {
            for s in &tally.subtests {
                println!("  {:<20} {}/{}", s.subtest.to_string(), s.score, s.max);
            }
        }
    }
}
