//! The `seavision list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use seavision_core::catalog::{self, Catalog};
use seavision_core::model::QuizKind;
use seavision_core::scoring::HueSet;
use seavision_core::traits::QuizItem;

struct QuizInfo {
    items: String,
    ids: String,
    scoring: &'static str,
}

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Title", "Items", "Ids", "Scoring"]);

    for quiz in QuizKind::ALL {
        let info = describe(quiz);
        table.add_row(vec![
            Cell::new(quiz),
            Cell::new(quiz.title()),
            Cell::new(info.items),
            Cell::new(info.ids),
            Cell::new(info.scoring),
        ]);
    }

    println!("{table}");
    Ok(())
}

/// `first..last` identifier range of a catalog.
fn id_range<T: QuizItem>(catalog: &Catalog<T>) -> String {
    match (catalog.items().first(), catalog.items().last()) {
        (Some(first), Some(last)) => format!("{}..{}", first.id(), last.id()),
        _ => String::new(),
    }
}

fn describe(quiz: QuizKind) -> QuizInfo {
    match quiz {
        QuizKind::Ishihara => {
            let plates = catalog::ishihara();
            QuizInfo {
                items: format!("{} plates", plates.len()),
                ids: id_range(&plates),
                scoring: "exact match per vision category",
            }
        }
        QuizKind::Lantern => {
            let pairs = catalog::lantern();
            QuizInfo {
                items: format!("{} pairs", pairs.len()),
                ids: id_range(&pairs),
                scoring: "both lights correct; pass with at most 1 error",
            }
        }
        QuizKind::Chart => {
            let questions = catalog::chart();
            QuizInfo {
                items: format!("{} questions", questions.len()),
                ids: id_range(&questions),
                scoring: "single label, grouped by display mode",
            }
        }
        QuizKind::Hue => {
            let (fm15, ecdis) = (HueSet::Fm15.catalog(), HueSet::Ecdis.catalog());
            QuizInfo {
                items: format!(
                    "{} swatches ({}) / {} ({})",
                    fm15.len(),
                    HueSet::Fm15,
                    ecdis.len(),
                    HueSet::Ecdis
                ),
                ids: format!("{} / {}", id_range(&fm15), id_range(&ecdis)),
                scoring: "rank distance (fm15) or positional (ecdis)",
            }
        }
        QuizKind::Radar => {
            let (probes, scale) = (catalog::radar_probes(), catalog::radar_intensity_scale());
            QuizInfo {
                items: format!("{} probes + {}-level scale", probes.len(), scale.len()),
                ids: format!("{} / {}", id_range(&probes), id_range(&scale)),
                scoring: "composite of four subtests",
            }
        }
    }
}
