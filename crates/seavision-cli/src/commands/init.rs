//! The `seavision init` command.

use anyhow::Result;

use seavision_core::config::STARTER_CONFIG;

pub fn execute() -> Result<()> {
    // Create seavision.toml
    if std::path::Path::new("seavision.toml").exists() {
        println!("seavision.toml already exists, skipping.");
    } else {
        std::fs::write("seavision.toml", STARTER_CONFIG)?;
        println!("Created seavision.toml");
    }

    // Create example answer sheet
    std::fs::create_dir_all("sheets")?;
    let example_path = std::path::Path::new("sheets/example.toml");
    if example_path.exists() {
        println!("sheets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_SHEET)?;
        println!("Created sheets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust thresholds in seavision.toml if needed");
    println!("  2. Run: seavision validate --sheet sheets/example.toml");
    println!("  3. Run: seavision score --sheet sheets/example.toml");
    println!("  4. Or take a quiz: seavision take --quiz lantern");

    Ok(())
}

const EXAMPLE_SHEET: &str = r#"# Lantern answers, left light then right light.
[sheet]
quiz = "lantern"
participant = "Example Mariner"

[answers]
pair-1 = "red green"
pair-2 = "red white"
pair-3 = "green white"
pair-4 = "yellow yellow"
pair-5 = "red red"
pair-6 = "green green"
pair-7 = "white white"
pair-8 = "red yellow"
pair-9 = "green yellow"
"#;
