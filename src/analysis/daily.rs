//! Daily selection of representative metric values.
//!
//! A day may hold several entries, one per logging action. The value shown
//! for a metric is the one from the latest-appended entry of that day that
//! carries the metric.

use crate::models::{Entry, Metric};
use chrono::NaiveDate;

/// Latest recorded value of `metric` on `day`, if any.
pub fn latest_for_day(entries: &[Entry], day: NaiveDate, metric: Metric) -> Option<f64> {
    entries
        .iter()
        .rev()
        .filter(|e| e.date == day)
        .find_map(|e| e.value(metric).filter(|v| *v != 0.0))
}

/// Representative value of `metric` for `today`; 0 when nothing was logged.
pub fn select_today(entries: &[Entry], today: NaiveDate, metric: Metric) -> f64 {
    latest_for_day(entries, today, metric).unwrap_or(0.0)
}

/// Number of entries logged on `day`.
pub fn entries_on(entries: &[Entry], day: NaiveDate) -> usize {
    entries.iter().filter(|e| e.date == day).count()
}
