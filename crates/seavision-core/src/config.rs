//! Configuration loading.
//!
//! Search order:
//! 1. an explicit path (`--config`)
//! 2. `seavision.toml` in the current directory
//! 3. `~/.config/seavision/config.toml`
//!
//! Environment overrides: `SEAVISION_SEED`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::assessment::AssessmentPolicy;
use crate::catalog::{self, Catalog, IshiharaPlate};
use crate::error::QuizError;
use crate::scoring::{HueSet, OrderingMode};

/// Top-level seavision configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeavisionConfig {
    /// Seed for sequence generation. Unset means a fresh random order each run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Name recorded in session reports.
    #[serde(default)]
    pub participant: Option<String>,
    #[serde(default)]
    pub ishihara: IshiharaConfig,
    #[serde(default)]
    pub hue: HueConfig,
    /// Verdict thresholds for every quiz.
    #[serde(default)]
    pub thresholds: AssessmentPolicy,
    /// Where `take --output` writes reports when no directory is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IshiharaConfig {
    /// Plate numbers used by a session. Unset means all 24.
    #[serde(default)]
    pub plates: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HueConfig {
    #[serde(default)]
    pub set: HueSet,
    /// Scoring mode. Unset means the set's own mode.
    #[serde(default)]
    pub mode: Option<OrderingMode>,
}

impl HueConfig {
    pub fn mode(&self) -> OrderingMode {
        self.mode.unwrap_or_else(|| self.set.default_mode())
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./seavision-results")
}

impl Default for SeavisionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            participant: None,
            ishihara: IshiharaConfig::default(),
            hue: HueConfig::default(),
            thresholds: AssessmentPolicy::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl SeavisionConfig {
    /// Random source for sequence generation: seeded when a seed is set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// The Ishihara catalog restricted to the configured plates.
    pub fn ishihara_catalog(&self) -> Result<Arc<Catalog<IshiharaPlate>>, QuizError> {
        let full = catalog::ishihara();
        match &self.ishihara.plates {
            None => Ok(full),
            Some(numbers) => {
                let ids: Vec<_> = numbers.iter().map(|&n| IshiharaPlate::plate_id(n)).collect();
                let subset = full.subset(ids.iter())?;
                if subset.is_empty() {
                    return Err(QuizError::EmptyCatalog(subset.quiz()));
                }
                Ok(Arc::new(subset))
            }
        }
    }
}

/// Load configuration from the default locations.
pub fn load_config() -> Result<SeavisionConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<SeavisionConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("seavision.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SeavisionConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

/// Parse TOML config content.
pub fn parse_config_str(content: &str) -> Result<SeavisionConfig> {
    let config: SeavisionConfig = toml::from_str(content)?;
    Ok(config)
}

fn apply_env_overrides<F>(config: &mut SeavisionConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("SEAVISION_SEED") {
        let seed = raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("SEAVISION_SEED is not a valid seed: {raw}"))?;
        config.seed = Some(seed);
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("seavision"))
}

/// Starter config written by `seavision init`.
pub const STARTER_CONFIG: &str = r#"# seavision configuration

# Fixed seed for reproducible question order (remove for a fresh order each run).
# seed = 42

# participant = "A. Mariner"

[ishihara]
# Use a subset of the 24 plates.
# plates = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23]

[hue]
# "fm15" (rank-distance) or "ecdis" (positional)
set = "fm15"

[thresholds.ishihara]
min_agreement = 0.5

[thresholds.lantern]
max_errors = 1

[thresholds.chart]
excellent = 85.0
adequate = 70.0

[thresholds.hue_rank]
excellent = 4
good = 8
fair = 12

[thresholds.hue_positional]
excellent = 85.0
good = 70.0
fair = 50.0

[thresholds.radar]
pass = 80.0
borderline = 60.0
count_ceiling = 5
"#;
