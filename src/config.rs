//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.fitsassy.toml` files.

use crate::analysis::{WeeklyGoals, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::models::HeightUnit;
use crate::tracker::TrackerSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".fitsassy.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Weekly goal settings.
    #[serde(default)]
    pub goals: GoalsConfig,

    /// Summary settings.
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Body check settings.
    #[serde(default)]
    pub body: BodyConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Path of the CSV record table.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            verbose: false,
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("health_data.csv")
}

/// Weekly targets over the summary window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    /// Minimum steps.
    #[serde(default = "default_steps_goal")]
    pub steps: u64,

    /// Minimum water in liters.
    #[serde(default = "default_water_goal")]
    pub water_liters: f64,

    /// Maximum calories.
    #[serde(default = "default_calories_goal")]
    pub calories: u64,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            steps: default_steps_goal(),
            water_liters: default_water_goal(),
            calories: default_calories_goal(),
        }
    }
}

fn default_steps_goal() -> u64 {
    35_000
}

fn default_water_goal() -> f64 {
    14.0
}

fn default_calories_goal() -> u64 {
    12_500
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Length of the trailing window in days, today included.
    #[serde(default = "default_window_days")]
    pub window_days: u32,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
        }
    }
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Unit of the height input: "meters" or "centimeters".
    #[serde(default)]
    pub height_unit: HeightUnit,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref data_file) = args.data_file {
            self.general.data_file = data_file.clone();
        }

        if let Some(unit) = args.height_unit {
            self.body.height_unit = unit.into();
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Log level after merging: `--quiet` wins, then `verbose` from either source.
    pub fn log_level(&self, args: &crate::cli::Args) -> tracing::Level {
        if self.general.verbose && !args.quiet {
            tracing::Level::DEBUG
        } else {
            args.log_level()
        }
    }

    /// Check values that would make the summaries meaningless.
    pub fn validate(&self) -> Result<()> {
        if self.summary.window_days == 0 {
            anyhow::bail!("summary.window_days must be at least 1");
        }
        if self.summary.window_days > MAX_WINDOW_DAYS {
            anyhow::bail!(
                "summary.window_days must be at most {} (got {})",
                MAX_WINDOW_DAYS,
                self.summary.window_days
            );
        }
        if !self.goals.water_liters.is_finite() || self.goals.water_liters < 0.0 {
            anyhow::bail!("goals.water_liters must be a non-negative number");
        }
        Ok(())
    }

    /// Settings handed to the tracker.
    pub fn tracker_settings(&self) -> TrackerSettings {
        TrackerSettings {
            goals: WeeklyGoals {
                steps: self.goals.steps as f64,
                water: self.goals.water_liters,
                calories: self.goals.calories as f64,
            },
            window_days: self.summary.window_days,
            height_unit: self.body.height_unit,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
