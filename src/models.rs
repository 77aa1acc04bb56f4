//! Data models for the health log.
//!
//! This module contains the core data structures shared by the store,
//! the selectors and the tracker: logged entries and the metrics they carry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest resting heart rate (bpm) the log accepts.
pub const MAX_HEART_RATE: u32 = 200;

/// Highest step count the log can store.
pub const MAX_STEPS: u64 = i64::MAX as u64;

/// A tracked health metric (one column of the log).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Body weight in kilograms.
    Weight,
    /// Height in meters.
    Height,
    /// Body mass index.
    Bmi,
    /// Calories consumed (kcal).
    Calories,
    /// Water intake in liters.
    Water,
    /// Resting heart rate (bpm).
    HeartRate,
    /// Step count.
    Steps,
}

impl Metric {
    /// Every tracked metric, in column order.
    pub const ALL: [Metric; 7] = [
        Metric::Weight,
        Metric::Height,
        Metric::Bmi,
        Metric::Calories,
        Metric::Water,
        Metric::HeartRate,
        Metric::Steps,
    ];

    /// Returns the unit the metric is stored in.
    pub fn unit(&self) -> &'static str {
        match self {
            Metric::Weight => "kg",
            Metric::Height => "m",
            Metric::Bmi => "",
            Metric::Calories => "kcal",
            Metric::Water => "L",
            Metric::HeartRate => "bpm",
            Metric::Steps => "steps",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Weight => write!(f, "Weight"),
            Metric::Height => write!(f, "Height"),
            Metric::Bmi => write!(f, "BMI"),
            Metric::Calories => write!(f, "Calories"),
            Metric::Water => write!(f, "Water"),
            Metric::HeartRate => write!(f, "Heart rate"),
            Metric::Steps => write!(f, "Steps"),
        }
    }
}

/// Unit the height input is given in.
///
/// Heights are always stored in meters; this only controls how raw input
/// is interpreted before BMI is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Meters,
    Centimeters,
}

impl HeightUnit {
    /// Convert a height given in this unit to meters.
    pub fn to_meters(&self, height: f64) -> f64 {
        match self {
            HeightUnit::Meters => height,
            HeightUnit::Centimeters => height / 100.0,
        }
    }
}

/// One logged record of metrics tagged with a date.
///
/// A metric that was not provided by the logging action is `None`. The
/// persisted table writes absence as `0`, so a measured zero and a missing
/// value cannot be told apart once saved; constructors normalize zero to
/// `None` to keep in-memory entries identical to what a reload yields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Calendar day of the logging action.
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<u64>,
}

impl Entry {
    /// Creates an entry for `date` with no metrics recorded.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            weight: None,
            height: None,
            bmi: None,
            calories: None,
            water: None,
            heart_rate: None,
            steps: None,
        }
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = present_int(calories as u64).map(|v| v as u32);
        self
    }

    pub fn with_water(mut self, liters: f64) -> Self {
        self.water = present_float(liters);
        self
    }

    pub fn with_heart_rate(mut self, bpm: u32) -> Self {
        self.heart_rate = present_int(bpm as u64).map(|v| v as u32);
        self
    }

    /// Counts above [`MAX_STEPS`] are clamped.
    pub fn with_steps(mut self, steps: u64) -> Self {
        self.steps = present_int(steps.min(MAX_STEPS));
        self
    }

    /// Records a body check: weight (kg), height (m) and the derived BMI.
    pub fn with_body(mut self, weight: f64, height_m: f64, bmi: f64) -> Self {
        self.weight = present_float(weight);
        self.height = present_float(height_m);
        self.bmi = present_float(bmi);
        self
    }

    /// Returns the value recorded for `metric`, if any.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Weight => self.weight,
            Metric::Height => self.height,
            Metric::Bmi => self.bmi,
            Metric::Calories => self.calories.map(f64::from),
            Metric::Water => self.water,
            Metric::HeartRate => self.heart_rate.map(f64::from),
            Metric::Steps => self.steps.map(|s| s as f64),
        }
    }

    /// True when no metric is recorded on this entry.
    pub fn is_clear(&self) -> bool {
        Metric::ALL.iter().all(|m| self.value(*m).is_none())
    }

    /// Returns a copy keeping only the date.
    pub fn cleared(&self) -> Self {
        Self::new(self.date)
    }

    /// Drops values that would not survive a save: zero, negative, NaN.
    pub fn normalized(self) -> Self {
        Self {
            date: self.date,
            weight: self.weight.and_then(present_float),
            height: self.height.and_then(present_float),
            bmi: self.bmi.and_then(present_float),
            calories: self.calories.filter(|v| *v != 0),
            water: self.water.and_then(present_float),
            heart_rate: self.heart_rate.filter(|v| *v != 0),
            steps: self.steps.and_then(present_int).map(|s| s.min(MAX_STEPS)),
        }
    }
}

/// Maps a float cell to a present value; zero, negative and NaN mean absent.
pub(crate) fn present_float(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

pub(crate) fn present_int(value: u64) -> Option<u64> {
    (value != 0).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[test]
    fn test_zero_normalizes_to_absent() {
        let entry = Entry::new(day()).with_calories(0).with_water(0.0).with_steps(0);
        assert_eq!(entry.calories, None);
        assert_eq!(entry.water, None);
        assert_eq!(entry.steps, None);
        assert!(entry.is_clear());
    }

    #[test]
    fn test_value_per_metric() {
        let entry = Entry::new(day())
            .with_calories(1800)
            .with_heart_rate(72)
            .with_steps(4000);

        assert_eq!(entry.value(Metric::Calories), Some(1800.0));
        assert_eq!(entry.value(Metric::HeartRate), Some(72.0));
        assert_eq!(entry.value(Metric::Steps), Some(4000.0));
        assert_eq!(entry.value(Metric::Water), None);
        assert!(!entry.is_clear());
    }

    #[test]
    fn test_cleared_keeps_date() {
        let entry = Entry::new(day()).with_body(70.0, 1.75, 22.86);
        let cleared = entry.cleared();
        assert_eq!(cleared.date, day());
        assert!(cleared.is_clear());
    }

    #[test]
    fn test_normalized_drops_unsavable_values() {
        let mut entry = Entry::new(day());
        entry.water = Some(-2.0);
        entry.calories = Some(0);
        entry.weight = Some(f64::NAN);
        entry.steps = Some(1200);

        let normalized = entry.normalized();
        assert_eq!(normalized.water, None);
        assert_eq!(normalized.calories, None);
        assert_eq!(normalized.weight, None);
        assert_eq!(normalized.steps, Some(1200));
    }

    #[test]
    fn test_steps_clamped_to_storable_range() {
        assert_eq!(Entry::new(day()).with_steps(u64::MAX).steps, Some(MAX_STEPS));

        let mut entry = Entry::new(day());
        entry.steps = Some(u64::MAX);
        assert_eq!(entry.normalized().steps, Some(MAX_STEPS));
    }

    #[test]
    fn test_height_unit_conversion() {
        assert_eq!(HeightUnit::Meters.to_meters(1.8), 1.8);
        assert!((HeightUnit::Centimeters.to_meters(180.0) - 1.8).abs() < 1e-12);
    }

    #[test]
    fn test_metric_display() {
        assert_eq!(Metric::HeartRate.to_string(), "Heart rate");
        assert_eq!(Metric::Bmi.to_string(), "BMI");
        assert_eq!(Metric::Water.unit(), "L");
    }
}
