//! seavision CLI: take colour-vision quizzes in the terminal and score
//! answer sheets.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seavision_core::model::QuizKind;

mod commands;

#[derive(Parser)]
#[command(
    name = "seavision",
    version,
    about = "Maritime colour-vision screening quizzes"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in quizzes
    List,

    /// Take a quiz interactively
    Take {
        /// Quiz to take: ishihara, lantern, chart, hue, radar
        #[arg(long)]
        quiz: QuizKind,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Name recorded in the report
        #[arg(long)]
        participant: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory to save the JSON report in (implies --save)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save a JSON report to the configured output directory
        #[arg(long)]
        save: bool,
    },

    /// Score answer sheets
    Score {
        /// Path to a .toml answer sheet or a directory of sheets
        #[arg(long)]
        sheet: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check answer sheets for problems without scoring them
    Validate {
        /// Path to a .toml answer sheet or a directory of sheets
        #[arg(long)]
        sheet: PathBuf,
    },

    /// Create a starter config and an example answer sheet
    Init,
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seavision=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List => commands::list::execute(),
        Commands::Take {
            quiz,
            seed,
            participant,
            config,
            output,
            save,
        } => commands::take::execute(quiz, seed, participant, config, output, save),
        Commands::Score {
            sheet,
            format,
            config,
        } => commands::score::execute(sheet, format, config),
        Commands::Validate { sheet } => commands::validate::execute(sheet),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
