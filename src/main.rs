//! Fit & Sassy - health metric log on the command line.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid input, config, unreadable or unwritable log)
//!   2 - `weekly --strict` found a missed goal

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use fitsassy::cli::{Args, Command, OutputFormat};
use fitsassy::config::{Config, CONFIG_FILE};
use fitsassy::models::Metric;
use fitsassy::report;
use fitsassy::store::CsvStore;
use fitsassy::tracker::Tracker;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle init-config early (no logging needed)
    if args.command == Command::InitConfig {
        return handle_init_config();
    }

    // Load config first; `general.verbose` feeds the log level
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    // Initialize logging
    init_logging(config.log_level(&args));
    log_config_source(&source);

    debug!("Arguments: {:?}", args);

    match run(args, config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .fitsassy.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).with_context(|| format!("Failed to write {}", CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE);
    println!("   Edit it to customize goals, the data file and the height unit.");
    Ok(())
}

/// Initialize logging at the merged verbosity level.
fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run one action against the log. Returns exit code (0 or 2).
fn run(args: Args, config: Config) -> Result<i32> {
    config.validate()?;

    let tracker = Tracker::new(config.tracker_settings());
    let today = args.date.unwrap_or_else(local_today);

    // A pure BMI check never touches the log.
    if let Command::Bmi {
        weight,
        height,
        save: false,
    } = args.command
    {
        let reading = tracker.check_bmi(weight, height)?;
        emit(args.format, &reading, || report::generate_bmi_text(&reading))?;
        return Ok(0);
    }

    let mut store = CsvStore::open(&config.general.data_file).with_context(|| {
        format!(
            "Failed to open health log {}",
            config.general.data_file.display()
        )
    })?;
    info!("Using health log {}", store.path().display());

    match args.command {
        Command::Bmi { weight, height, .. } => {
            let reading = tracker.log_body(&mut store, today, weight, height)?;
            emit(args.format, &reading, || report::generate_bmi_text(&reading))?;
        }
        Command::Calories { kcal } => {
            let reading = tracker.log_calories(&mut store, today, kcal)?;
            emit(args.format, &reading, || {
                report::generate_logged_line(Metric::Calories, &reading)
            })?;
        }
        Command::Water { liters } => {
            let reading = tracker.log_water(&mut store, today, liters)?;
            emit(args.format, &reading, || {
                report::generate_logged_line(Metric::Water, &reading)
            })?;
        }
        Command::Heart { bpm, steps } => {
            let log = tracker.log_heart_activity(&mut store, today, bpm, steps)?;
            emit(args.format, &log, || report::generate_heart_activity_text(&log))?;
        }
        Command::Summary => {
            let summary = tracker.daily_summary(&store, today);
            emit(args.format, &summary, || report::generate_daily_text(&summary))?;
        }
        Command::Weekly { strict } => {
            let dashboard = tracker.weekly_dashboard(&store, today);
            emit(args.format, &dashboard, || {
                report::generate_weekly_text(&dashboard)
            })?;

            if strict && !dashboard.all_met() {
                eprintln!("\n⛔ Weekly goals missed. Failing (exit code 2).");
                return Ok(2);
            }
        }
        Command::Reset => {
            let outcome = tracker.reset_week(&mut store)?;
            emit(args.format, &outcome, || report::generate_reset_text(&outcome))?;
        }
        Command::InitConfig => unreachable!("handled before logging starts"),
    }

    Ok(0)
}

/// Print `value` as JSON or as the text produced by `text`.
fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    let output = match format {
        OutputFormat::Json => report::generate_json_report(value)?,
        OutputFormat::Text => text(),
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Where the active configuration came from.
enum ConfigSource {
    Explicit(PathBuf),
    Default,
    Builtin,
    Fallback(anyhow::Error),
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::Default)),
        Ok(None) => Ok((Config::default(), ConfigSource::Builtin)),
        Err(e) => Ok((Config::default(), ConfigSource::Fallback(e))),
    }
}

fn log_config_source(source: &ConfigSource) {
    match source {
        ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::Default => info!("Loaded default config from {}", CONFIG_FILE),
        ConfigSource::Builtin => debug!("No config file found, using defaults"),
        ConfigSource::Fallback(e) => warn!("Failed to load config: {:#}", e),
    }
}
