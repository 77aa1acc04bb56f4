//! Logging actions and read views over a record store.
//!
//! Each action is one load/mutate/persist cycle against the store handed
//! in by the caller. Input values arrive raw from the front end and are
//! validated here before anything is appended.

use crate::analysis::{entries_on, select_today, WeeklyDashboard, WeeklyGoals, DEFAULT_WINDOW_DAYS};
use crate::categorize::{
    categorize_calories, categorize_heart_rate, categorize_steps, categorize_water, compute_bmi,
    BmiReading, CalorieLevel, HeartRateZone, Reading, StepLevel, WaterLevel,
};
use crate::error::{TrackerResult, ValidationError};
use crate::models::{Entry, HeightUnit, Metric, MAX_HEART_RATE, MAX_STEPS};
use crate::store::{reset_week, RecordStore, ResetOutcome};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

/// Highest resting heart rate accepted from input.

/// Settings shared by all actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerSettings {
    pub goals: WeeklyGoals,
    pub window_days: u32,
    pub height_unit: HeightUnit,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            goals: WeeklyGoals::default(),
            window_days: DEFAULT_WINDOW_DAYS,
            height_unit: HeightUnit::default(),
        }
    }
}

/// Readings returned when heart rate and steps are logged together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartActivityLog {
    pub heart_rate: Reading<HeartRateZone>,
    pub steps: Reading<StepLevel>,
}

/// Same-day snapshot: the latest logged value of each metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// Entries logged on `date`.
    pub entries_logged: usize,
    pub calories: Reading<CalorieLevel>,
    pub water: Reading<WaterLevel>,
    pub steps: Reading<StepLevel>,
    pub heart_rate: Reading<HeartRateZone>,
}

impl DailySummary {
    pub fn is_empty(&self) -> bool {
        self.entries_logged == 0
    }
}

/// Action handlers for the health log.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    settings: TrackerSettings,
}

impl Tracker {
    pub fn new(settings: TrackerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// Log calories consumed on `today`.
    pub fn log_calories<S: RecordStore>(
        &self,
        store: &mut S,
        today: NaiveDate,
        calories: i64,
    ) -> TrackerResult<Reading<CalorieLevel>> {
        let calories = whole_number("calories", calories, u32::MAX as i64)? as u32;

        store.append(Entry::new(today).with_calories(calories))?;
        info!("Logged {} kcal for {}", calories, today);

        Ok(categorize_calories(f64::from(calories)))
    }

    /// Log water intake (liters) on `today`.
    pub fn log_water<S: RecordStore>(
        &self,
        store: &mut S,
        today: NaiveDate,
        liters: f64,
    ) -> TrackerResult<Reading<WaterLevel>> {
        non_negative("water", liters)?;

        store.append(Entry::new(today).with_water(liters))?;
        info!("Logged {} L water for {}", liters, today);

        Ok(categorize_water(liters))
    }

    /// Log resting heart rate and steps as one entry.
    pub fn log_heart_activity<S: RecordStore>(
        &self,
        store: &mut S,
        today: NaiveDate,
        heart_rate: i64,
        steps: i64,
    ) -> TrackerResult<HeartActivityLog> {
        let heart_rate = whole_number("heart rate", heart_rate, i64::from(MAX_HEART_RATE))? as u32;
        let steps = whole_number("steps", steps, MAX_STEPS as i64)? as u64;

        store.append(
            Entry::new(today)
                .with_heart_rate(heart_rate)
                .with_steps(steps),
        )?;
        info!("Logged {} bpm and {} steps for {}", heart_rate, steps, today);

        Ok(HeartActivityLog {
            heart_rate: categorize_heart_rate(f64::from(heart_rate)),
            steps: categorize_steps(steps as f64),
        })
    }

    /// Compute BMI without storing anything.
    pub fn check_bmi(&self, weight_kg: f64, height: f64) -> TrackerResult<BmiReading> {
        Ok(compute_bmi(weight_kg, height, self.settings.height_unit)?)
    }

    /// Compute BMI and append weight, height (meters) and BMI as an entry.
    pub fn log_body<S: RecordStore>(
        &self,
        store: &mut S,
        today: NaiveDate,
        weight_kg: f64,
        height: f64,
    ) -> TrackerResult<BmiReading> {
        let reading = self.check_bmi(weight_kg, height)?;

        store.append(Entry::new(today).with_body(reading.weight_kg, reading.height_m, reading.bmi))?;
        info!("Logged body check for {}: BMI {:.2}", today, reading.bmi);

        Ok(reading)
    }

    /// Latest non-zero value of each metric logged on `today`.
    pub fn daily_summary<S: RecordStore + ?Sized>(&self, store: &S, today: NaiveDate) -> DailySummary {
        let entries = store.load_all();

        DailySummary {
            date: today,
            entries_logged: entries_on(entries, today),
            calories: categorize_calories(select_today(entries, today, Metric::Calories)),
            water: categorize_water(select_today(entries, today, Metric::Water)),
            steps: categorize_steps(select_today(entries, today, Metric::Steps)),
            heart_rate: categorize_heart_rate(select_today(entries, today, Metric::HeartRate)),
        }
    }

    /// Trailing-window totals against the weekly goals.
    pub fn weekly_dashboard<S: RecordStore + ?Sized>(
        &self,
        store: &S,
        today: NaiveDate,
    ) -> WeeklyDashboard {
        WeeklyDashboard::build(
            store.load_all(),
            today,
            self.settings.window_days,
            &self.settings.goals,
        )
    }

    /// Clear tracked metrics for a fresh week.
    pub fn reset_week<S: RecordStore>(&self, store: &mut S) -> TrackerResult<ResetOutcome> {
        Ok(reset_week(store)?)
    }
}

fn whole_number(field: &'static str, value: i64, max: i64) -> Result<i64, ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field,
            value: value as f64,
        });
    }
    if value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: value as f64,
            max: max as f64,
        });
    }
    Ok(value)
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::BmiCategory;
    use crate::error::TrackerError;
    use crate::store::{CsvStore, MemoryStore};
    use tempfile::TempDir;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_calories_end_to_end() {
        let tracker = Tracker::default();
        let mut store = MemoryStore::new();

        let logged = tracker.log_calories(&mut store, day(10), 1800).unwrap();
        assert_eq!(logged.value, 1800.0);
        assert_eq!(logged.category, CalorieLevel::Average);

        let summary = tracker.daily_summary(&store, day(10));
        assert_eq!(summary.calories.value, 1800.0);
        assert_eq!(summary.calories.label(), "Average");

        tracker.log_calories(&mut store, day(10), 0).unwrap();
        let summary = tracker.daily_summary(&store, day(10));
        assert_eq!(summary.calories.value, 1800.0);
        assert_eq!(summary.entries_logged, 2);
    }

    #[test]
    fn test_weekly_steps_end_to_end() {
        let tracker = Tracker::default();
        let mut store = MemoryStore::new();

        for (offset, steps) in [0, 4000, 0, 6000, 0, 0, 20000].into_iter().enumerate() {
            tracker
                .log_heart_activity(&mut store, day(4 + offset as u32), 0, steps)
                .unwrap();
        }

        let dashboard = tracker.weekly_dashboard(&store, day(10));
        assert_eq!(dashboard.steps.total, 30_000.0);
        assert_eq!(dashboard.steps.goal, 35_000.0);
        assert!(!dashboard.steps.met);
    }

    #[test]
    fn test_heart_rate_unlogged_in_summary() {
        let tracker = Tracker::default();
        let mut store = MemoryStore::new();

        tracker.log_water(&mut store, day(10), 1.8).unwrap();
        let summary = tracker.daily_summary(&store, day(10));
        assert_eq!(summary.heart_rate.category, HeartRateZone::Unlogged);
        assert_eq!(summary.water.category, WaterLevel::Good);

        let log = tracker.log_heart_activity(&mut store, day(10), 110, 0).unwrap();
        assert_eq!(log.heart_rate.category, HeartRateZone::Tachycardia);
        assert_eq!(log.steps.category, StepLevel::None);
    }

    #[test]
    fn test_empty_summary() {
        let tracker = Tracker::default();
        let store = MemoryStore::new();

        let summary = tracker.daily_summary(&store, day(10));
        assert!(summary.is_empty());
        assert_eq!(summary.steps.value, 0.0);
    }

    #[test]
    fn test_validation_leaves_store_untouched() {
        let tracker = Tracker::default();
        let mut store = MemoryStore::new();

        assert!(matches!(
            tracker.log_calories(&mut store, day(10), -5),
            Err(TrackerError::Validation(ValidationError::Negative { .. }))
        ));
        assert!(matches!(
            tracker.log_heart_activity(&mut store, day(10), 201, 100),
            Err(TrackerError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            tracker.log_water(&mut store, day(10), f64::NAN),
            Err(TrackerError::Validation(ValidationError::NotFinite { .. }))
        ));
        assert!(matches!(
            tracker.log_body(&mut store, day(10), 70.0, 0.0),
            Err(TrackerError::Validation(ValidationError::NonPositive { .. }))
        ));

        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_log_body_with_centimeters() {
        let tracker = Tracker::new(TrackerSettings {
            height_unit: HeightUnit::Centimeters,
            ..TrackerSettings::default()
        });
        let mut store = MemoryStore::new();

        let reading = tracker.log_body(&mut store, day(10), 81.0, 180.0).unwrap();
        assert!((reading.bmi - 25.0).abs() < 1e-9);
        assert_eq!(reading.category, BmiCategory::Overweight);

        let entry = &store.load_all()[0];
        assert_eq!(entry.height, Some(1.8));
        assert_eq!(entry.weight, Some(81.0));
    }

    #[test]
    fn test_reset_through_csv_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("health_data.csv");
        let tracker = Tracker::default();

        let mut store = CsvStore::open(&path).unwrap();
        tracker.log_water(&mut store, day(10), 2.0).unwrap();
        tracker.log_calories(&mut store, day(10), 900).unwrap();

        assert_eq!(
            tracker.reset_week(&mut store).unwrap(),
            ResetOutcome::Cleared { rows: 2 }
        );
        assert_eq!(tracker.reset_week(&mut store).unwrap(), ResetOutcome::AlreadyClear);

        let reopened = CsvStore::open(&path).unwrap();
        assert_eq!(reopened.load_all().len(), 2);
        let dashboard = tracker.weekly_dashboard(&reopened, day(10));
        assert_eq!(dashboard.water.total, 0.0);
        assert_eq!(dashboard.calories.total, 0.0);
    }
}
