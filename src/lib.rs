//! Fit & Sassy - daily health metric log.
//!
//! Records weight, height, calories, water, heart rate and steps into an
//! append-only CSV log, and reports a same-day snapshot and a trailing
//! 7-day aggregate against fixed goals, with each value mapped to a
//! category and a comment.
//!
//! ```no_run
//! use chrono::Local;
//! use fitsassy::store::CsvStore;
//! use fitsassy::tracker::Tracker;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = Tracker::default();
//! let mut store = CsvStore::open("health_data.csv")?;
//! let today = Local::now().date_naive();
//!
//! let logged = tracker.log_calories(&mut store, today, 1800)?;
//! println!("{} kcal: {}", logged.value, logged.label());
//!
//! let weekly = tracker.weekly_dashboard(&store, today);
//! println!("steps goal met: {}", weekly.steps.met);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod categorize;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod store;
pub mod tracker;

pub use error::{StoreError, TrackerError, ValidationError};
pub use models::{Entry, HeightUnit, Metric};
pub use store::{CsvStore, MemoryStore, RecordStore};
pub use tracker::{Tracker, TrackerSettings};
