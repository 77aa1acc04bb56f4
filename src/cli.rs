//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::HeightUnit;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fit & Sassy - tracking your health and judging your life choices
///
/// Log calories, water, heart rate and steps, then check today's snapshot
/// or the trailing week against your goals.
///
/// Examples:
///   fitsassy calories 1800
///   fitsassy water 0.5
///   fitsassy heart --bpm 64 --steps 8200
///   fitsassy bmi --weight 72 --height 1.8 --save
///   fitsassy summary --format json
///   fitsassy weekly --strict
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    ///
    /// If not specified, looks for .fitsassy.toml in the current directory
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// CSV file holding the health log
    #[arg(long, value_name = "FILE", env = "FITSASSY_DATA_FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Day to log or report on (defaults to today)
    #[arg(long, value_name = "YYYY-MM-DD", global = true)]
    pub date: Option<NaiveDate>,

    /// Unit of the --height input
    #[arg(long, value_name = "UNIT", global = true)]
    pub height_unit: Option<HeightUnitArg>,

    /// Output format (text, json)
    #[arg(long, default_value = "text", value_name = "FORMAT", global = true)]
    pub format: OutputFormat,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Actions on the health log.
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Buff or fluff? Compute BMI from weight and height
    Bmi {
        /// Weight in kilograms
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        /// Height (meters unless --height-unit says otherwise)
        #[arg(long, allow_negative_numbers = true)]
        height: f64,

        /// Also store weight, height and BMI in the log
        #[arg(long)]
        save: bool,
    },

    /// Calorie confessions: log calories consumed
    Calories {
        /// Calories in kcal
        #[arg(allow_negative_numbers = true)]
        kcal: i64,
    },

    /// Hydration station: log water intake
    Water {
        /// Water in liters
        #[arg(allow_negative_numbers = true)]
        liters: f64,
    },

    /// Heart & hustle: log resting heart rate and steps
    Heart {
        /// Resting heart rate in bpm (0-200)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        bpm: i64,

        /// Steps walked
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        steps: i64,
    },

    /// Today's health snapshot
    Summary,

    /// Weekly targets dashboard
    Weekly {
        /// Exit with code 2 when any goal is missed
        #[arg(long)]
        strict: bool,
    },

    /// Restart weekly logs: zero every tracked metric
    Reset,

    /// Generate a default .fitsassy.toml configuration file
    InitConfig,
}

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Height unit accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum HeightUnitArg {
    Meters,
    Centimeters,
}

impl From<HeightUnitArg> for HeightUnit {
    fn from(unit: HeightUnitArg) -> Self {
        match unit {
            HeightUnitArg::Meters => HeightUnit::Meters,
            HeightUnitArg::Centimeters => HeightUnit::Centimeters,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Command::Heart { bpm: 0, steps: 0 } = self.command {
            return Err("Provide --bpm and/or --steps".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: Command) -> Args {
        Args {
            command,
            config: None,
            data_file: None,
            date: None,
            height_unit: None,
            format: OutputFormat::Text,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn test_parse_subcommands() {
        let args = Args::try_parse_from(["fitsassy", "calories", "1800"]).unwrap();
        assert_eq!(args.command, Command::Calories { kcal: 1800 });

        let args = Args::try_parse_from([
            "fitsassy",
            "heart",
            "--bpm",
            "64",
            "--steps",
            "8200",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.command, Command::Heart { bpm: 64, steps: 8200 });
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_global_date_and_unit() {
        let args = Args::try_parse_from([
            "fitsassy",
            "bmi",
            "--weight",
            "70",
            "--height",
            "175",
            "--height-unit",
            "centimeters",
            "--date",
            "2025-03-10",
        ])
        .unwrap();

        assert_eq!(args.date, NaiveDate::from_ymd_opt(2025, 3, 10));
        assert_eq!(args.height_unit, Some(HeightUnitArg::Centimeters));
        assert!(matches!(args.command, Command::Bmi { save: false, .. }));
    }

    #[test]
    fn test_negative_values_reach_validation() {
        let args = Args::try_parse_from(["fitsassy", "water", "-1.5"]).unwrap();
        assert_eq!(args.command, Command::Water { liters: -1.5 });
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args(Command::Summary);
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_empty_heart_log() {
        let args = make_args(Command::Heart { bpm: 0, steps: 0 });
        assert!(args.validate().is_err());

        let args = make_args(Command::Heart { bpm: 70, steps: 0 });
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args(Command::Summary);
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }
}
