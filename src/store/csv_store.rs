//! CSV-backed record store.
//!
//! The table has one row per logging action with the columns
//! `Date,Weight,Height,BMI,Calories,Water,HeartRate,Steps`. Absent metrics
//! are written as `0`. Every save rewrites the full table into a temporary
//! file next to the target and renames it into place.

use super::RecordStore;
use crate::error::StoreError;
use crate::models::{present_float, Entry, MAX_HEART_RATE, MAX_STEPS};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Column header of the persisted table.
pub const HEADER: [&str; 8] = [
    "Date",
    "Weight",
    "Height",
    "BMI",
    "Calories",
    "Water",
    "HeartRate",
    "Steps",
];

/// File-backed store, loaded eagerly and flushed after every change.
#[derive(Debug)]
pub struct CsvStore {
    path: PathBuf,
    entries: Vec<Entry>,
    dirty: bool,
}

impl CsvStore {
    /// Open the table at `path`, creating an empty one on first run.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| StoreError::persistence(&path, e))?;
            }

            let mut store = Self {
                path,
                entries: Vec::new(),
                dirty: true,
            };
            store.save()?;
            info!("Initialized empty record store at {}", store.path.display());
            return Ok(store);
        }

        let entries = read_entries(&path)?;
        debug!("Loaded {} entries from {}", entries.len(), path.display());

        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the full table, replacing the file atomically.
    fn save(&mut self) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::persistence(&self.path, e))?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(tmp.as_file());

            writer
                .write_record(HEADER)
                .map_err(|e| StoreError::persistence(&self.path, e))?;
            for entry in &self.entries {
                writer
                    .serialize(EntryRow::from(entry))
                    .map_err(|e| StoreError::persistence(&self.path, e))?;
            }
            writer
                .flush()
                .map_err(|e| StoreError::persistence(&self.path, e))?;
        }

        tmp.persist(&self.path)
            .map_err(|e| StoreError::persistence(&self.path, e.error))?;

        self.dirty = false;
        debug!("Saved {} entries to {}", self.entries.len(), self.path.display());
        Ok(())
    }
}

impl RecordStore for CsvStore {
    fn load_all(&self) -> &[Entry] {
        &self.entries
    }

    fn append(&mut self, entry: Entry) -> Result<(), StoreError> {
        self.entries.push(entry.normalized());
        self.dirty = true;
        self.save()
    }

    fn overwrite(&mut self, entries: Vec<Entry>) -> Result<(), StoreError> {
        self.entries = entries.into_iter().map(Entry::normalized).collect();
        self.dirty = true;
        self.save()
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }
}

/// Read every row of the table at `path`.
fn read_entries(path: &Path) -> Result<Vec<Entry>, StoreError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| StoreError::persistence(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| StoreError::persistence(path, e))?
        .clone();

    let mut entries = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            if e.is_io_error() {
                StoreError::persistence(path, e)
            } else {
                StoreError::Corrupt {
                    path: path.to_path_buf(),
                    line: e.position().map(|p| p.line()).unwrap_or(0),
                    message: e.to_string(),
                }
            }
        })?;

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let row: EntryRow = record
            .deserialize(Some(&headers))
            .map_err(|e| StoreError::Corrupt {
                path: path.to_path_buf(),
                line,
                message: e.to_string(),
            })?;

        entries.push(row.into_entry(line));
    }

    Ok(entries)
}

/// One persisted row. Absence is the zero sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EntryRow {
    #[serde(rename = "Date", serialize_with = "write_date", deserialize_with = "read_date")]
    date: NaiveDate,
    #[serde(rename = "Weight", deserialize_with = "read_float")]
    weight: f64,
    #[serde(rename = "Height", deserialize_with = "read_float")]
    height: f64,
    #[serde(rename = "BMI", deserialize_with = "read_float")]
    bmi: f64,
    #[serde(rename = "Calories", deserialize_with = "read_int")]
    calories: i64,
    #[serde(rename = "Water", deserialize_with = "read_float")]
    water: f64,
    #[serde(rename = "HeartRate", deserialize_with = "read_int")]
    heart_rate: i64,
    #[serde(rename = "Steps", deserialize_with = "read_int")]
    steps: i64,
}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            date: entry.date,
            weight: entry.weight.unwrap_or(0.0),
            height: entry.height.unwrap_or(0.0),
            bmi: entry.bmi.unwrap_or(0.0),
            calories: entry.calories.map(i64::from).unwrap_or(0),
            water: entry.water.unwrap_or(0.0),
            heart_rate: entry.heart_rate.map(i64::from).unwrap_or(0),
            steps: entry
                .steps
                .map(|s| i64::try_from(s.min(MAX_STEPS)).unwrap_or(i64::MAX))
                .unwrap_or(0),
        }
    }
}

impl EntryRow {
    /// Convert to an entry. Cells that cannot hold a measurement are
    /// skipped with a warning instead of failing the load.
    fn into_entry(self, line: u64) -> Entry {
        Entry {
            date: self.date,
            weight: float_cell("Weight", self.weight, line),
            height: float_cell("Height", self.height, line),
            bmi: float_cell("BMI", self.bmi, line),
            calories: int_cell("Calories", self.calories, u32::MAX as i64, line).map(|v| v as u32),
            water: float_cell("Water", self.water, line),
            heart_rate: int_cell("HeartRate", self.heart_rate, i64::from(MAX_HEART_RATE), line)
                .map(|v| v as u32),
            steps: int_cell("Steps", self.steps, MAX_STEPS as i64, line).map(|v| v as u64),
        }
    }
}

fn float_cell(column: &str, value: f64, line: u64) -> Option<f64> {
    if value != 0.0 && present_float(value).is_none() {
        warn!("Ignoring invalid {} value {} at line {}", column, value, line);
    }
    present_float(value)
}

fn int_cell(column: &str, value: i64, max: i64, line: u64) -> Option<i64> {
    if value < 0 || value > max {
        warn!("Ignoring invalid {} value {} at line {}", column, value, line);
        return None;
    }
    (value != 0).then_some(value)
}

fn write_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time of day.
fn read_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").map(|dt| dt.date()))
        .map_err(|_| serde::de::Error::custom(format!("invalid date '{}'", raw)))
}

/// Empty cells read as zero.
fn read_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.parse::<f64>()
        .map_err(|_| serde::de::Error::custom(format!("invalid number '{}'", raw)))
}

/// Accepts integral floats such as `1800.0`.
fn read_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();

    if raw.is_empty() {
        return Ok(0);
    }
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(value);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 => Ok(value as i64),
        _ => Err(serde::de::Error::custom(format!(
            "invalid whole number '{}'",
            raw
        ))),
    }
}
