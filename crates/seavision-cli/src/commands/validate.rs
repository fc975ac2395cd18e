//! The `seavision validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(sheet_path: PathBuf) -> Result<()> {
    let sheets = if sheet_path.is_dir() {
        seavision_core::parser::load_sheet_directory(&sheet_path)?
    } else {
        vec![seavision_core::parser::parse_sheet(&sheet_path)?]
    };

    let mut total_warnings = 0;

    for sheet in &sheets {
        println!(
            "Sheet: {} ({}, {} answers)",
            sheet.source.display(),
            sheet.quiz,
            sheet.answers.len()
        );

        let warnings = seavision_core::parser::validate_sheet(sheet);
        for w in &warnings {
            let prefix = w
                .item
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All answer sheets valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
