//! Windowed aggregation and weekly goal evaluation.
//!
//! Sums are taken over every entry in the window with no per-day
//! deduplication: a day logged five times contributes five values.

use crate::models::{Entry, Metric};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default length of the trailing window, in days.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Longest window a configuration may ask for.
pub const MAX_WINDOW_DAYS: u32 = 3660;

/// First day of the window of `window_days` ending on `today` (inclusive).
///
/// A window reaching past the earliest representable date starts there.
pub fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(window_days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN)
}

/// Entries dated within `[today - (window_days - 1), today]`.
pub fn entries_in_window(
    entries: &[Entry],
    today: NaiveDate,
    window_days: u32,
) -> impl Iterator<Item = &Entry> {
    let start = window_start(today, window_days);
    entries
        .iter()
        .filter(move |e| window_days > 0 && e.date >= start && e.date <= today)
}

/// Sum of `metric` across all entries in the trailing window.
pub fn sum_window(entries: &[Entry], today: NaiveDate, metric: Metric, window_days: u32) -> f64 {
    entries_in_window(entries, today, window_days)
        .filter_map(|e| e.value(metric))
        .sum()
}

/// Whether a total must reach or stay under its goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    AtLeast,
    AtMost,
}

impl GoalDirection {
    pub fn is_met(&self, total: f64, goal: f64) -> bool {
        match self {
            GoalDirection::AtLeast => total >= goal,
            GoalDirection::AtMost => total <= goal,
        }
    }
}

/// Weekly targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyGoals {
    /// Minimum steps over the window.
    pub steps: f64,
    /// Minimum water over the window, in liters.
    pub water: f64,
    /// Maximum calories over the window.
    pub calories: f64,
}

impl Default for WeeklyGoals {
    fn default() -> Self {
        Self {
            steps: 35_000.0,
            water: 14.0,
            calories: 12_500.0,
        }
    }
}

/// A window total measured against its goal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub metric: Metric,
    pub total: f64,
    pub goal: f64,
    pub direction: GoalDirection,
    pub met: bool,
}

impl GoalProgress {
    pub fn evaluate(metric: Metric, total: f64, goal: f64, direction: GoalDirection) -> Self {
        Self {
            metric,
            total,
            goal,
            direction,
            met: direction.is_met(total, goal),
        }
    }
}

/// Totals for the trailing window against the weekly goals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyDashboard {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Number of entries that fell in the window.
    pub entries_in_window: usize,
    pub steps: GoalProgress,
    pub water: GoalProgress,
    pub calories: GoalProgress,
}

impl WeeklyDashboard {
    pub fn build(entries: &[Entry], today: NaiveDate, window_days: u32, goals: &WeeklyGoals) -> Self {
        let total = |metric| sum_window(entries, today, metric, window_days);

        Self {
            start: window_start(today, window_days),
            end: today,
            entries_in_window: entries_in_window(entries, today, window_days).count(),
            steps: GoalProgress::evaluate(
                Metric::Steps,
                total(Metric::Steps),
                goals.steps,
                GoalDirection::AtLeast,
            ),
            water: GoalProgress::evaluate(
                Metric::Water,
                total(Metric::Water),
                goals.water,
                GoalDirection::AtLeast,
            ),
            calories: GoalProgress::evaluate(
                Metric::Calories,
                total(Metric::Calories),
                goals.calories,
                GoalDirection::AtMost,
            ),
        }
    }

    /// The three goals in display order.
    pub fn goals(&self) -> [&GoalProgress; 3] {
        [&self.steps, &self.water, &self.calories]
    }

    pub fn all_met(&self) -> bool {
        self.goals().iter().all(|g| g.met)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn steps_week() -> Vec<Entry> {
        [0, 4000, 0, 6000, 0, 0, 20000]
            .iter()
            .enumerate()
            .map(|(i, steps)| Entry::new(day(4 + i as u32)).with_steps(*steps))
            .collect()
    }

    #[test]
    fn test_window_start_saturates_at_min_date() {
        assert_eq!(window_start(day(10), 7), day(4));
        assert_eq!(window_start(day(10), 1), day(10));
        assert_eq!(window_start(day(10), u32::MAX), NaiveDate::MIN);
    }

    #[test]
    fn test_huge_window_covers_every_entry() {
        let entries = steps_week();
        assert_eq!(sum_window(&entries, day(10), Metric::Steps, u32::MAX), 30000.0);
        assert_eq!(entries_in_window(&entries, day(10), u32::MAX).count(), 7);
    }

    #[test]
    fn test_sum_window_steps_week() {
        let entries = steps_week();
        assert_eq!(sum_window(&entries, day(10), Metric::Steps, 7), 30_000.0);

        let dashboard = WeeklyDashboard::build(&entries, day(10), 7, &WeeklyGoals::default());
        assert_eq!(dashboard.steps.total, 30_000.0);
        assert!(!dashboard.steps.met);
        assert_eq!(dashboard.entries_in_window, 7);
    }

    #[test]
    fn test_sum_window_bounds_inclusive() {
        let entries = vec![
            Entry::new(day(3)).with_water(5.0),
            Entry::new(day(4)).with_water(1.0),
            Entry::new(day(10)).with_water(2.0),
            Entry::new(day(11)).with_water(7.0),
        ];
        assert_eq!(sum_window(&entries, day(10), Metric::Water, 7), 3.0);
    }

    #[test]
    fn test_sum_window_counts_duplicates() {
        let entries: Vec<Entry> = (0..5)
            .map(|_| Entry::new(day(10)).with_calories(500))
            .collect();
        assert_eq!(sum_window(&entries, day(10), Metric::Calories, 7), 2_500.0);
    }

    #[test]
    fn test_sum_window_zero_days() {
        let entries = vec![Entry::new(day(10)).with_steps(100)];
        assert_eq!(sum_window(&entries, day(10), Metric::Steps, 0), 0.0);
        assert_eq!(sum_window(&entries, day(10), Metric::Steps, 1), 100.0);
    }

    #[test]
    fn test_goal_directions() {
        let entries = vec![
            Entry::new(day(9)).with_water(8.0).with_calories(12_500),
            Entry::new(day(10)).with_water(6.0).with_steps(35_000),
        ];

        let dashboard = WeeklyDashboard::build(&entries, day(10), 7, &WeeklyGoals::default());
        assert!(dashboard.water.met);
        assert!(dashboard.steps.met);
        assert!(dashboard.calories.met);
        assert!(dashboard.all_met());

        let over = GoalProgress::evaluate(Metric::Calories, 12_501.0, 12_500.0, GoalDirection::AtMost);
        assert!(!over.met);
    }

    #[test]
    fn test_empty_window() {
        let dashboard = WeeklyDashboard::build(&[], day(10), 7, &WeeklyGoals::default());
        assert_eq!(dashboard.entries_in_window, 0);
        assert_eq!(dashboard.start, day(4));
        assert!(!dashboard.steps.met);
        assert!(dashboard.calories.met);
    }
}
