//! Text and JSON rendering of tracker results.
//!
//! This module turns readings, summaries and dashboards into the text the
//! command line prints.

use crate::analysis::{GoalProgress, WeeklyDashboard};
use crate::categorize::{Assessment, BmiReading, Reading};
use crate::models::Metric;
use crate::store::ResetOutcome;
use crate::tracker::{DailySummary, HeartActivityLog};
use anyhow::Result;
use serde::Serialize;

/// Confirmation line for a logged metric.
pub fn generate_logged_line<C: Assessment>(metric: Metric, reading: &Reading<C>) -> String {
    format!(
        "{} logged: {} {} → {}",
        metric,
        reading.value,
        metric.unit(),
        reading.comment()
    )
}

/// Confirmation for a combined heart rate and steps log.
pub fn generate_heart_activity_text(log: &HeartActivityLog) -> String {
    format!(
        "Heart rate: {} bpm, Steps: {} → {}",
        log.heart_rate.value,
        log.steps.value,
        log.steps.comment()
    )
}

/// Verdict line for a body check.
pub fn generate_bmi_text(reading: &BmiReading) -> String {
    format!(
        "Your BMI is {:.2} → {}",
        reading.bmi,
        reading.category.comment()
    )
}

/// Today's snapshot.
pub fn generate_daily_text(summary: &DailySummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Daily Summary for {}\n\n", summary.date));

    if summary.is_empty() {
        output.push_str("No logs today yet!\n");
        return output;
    }

    output.push_str(&format!(
        "- Calories: {} kcal → {}\n",
        summary.calories.value,
        summary.calories.comment()
    ));
    output.push_str(&format!(
        "- Water: {} L → {}\n",
        summary.water.value,
        summary.water.comment()
    ));
    output.push_str(&format!(
        "- Steps: {} → {}\n",
        summary.steps.value,
        summary.steps.comment()
    ));

    if summary.heart_rate.value > 0.0 {
        output.push_str(&format!(
            "- Heart Rate: {} bpm → {}\n",
            summary.heart_rate.value,
            summary.heart_rate.comment()
        ));
    } else {
        output.push_str(&format!("- {}\n", summary.heart_rate.comment()));
    }

    output
}

/// Weekly targets dashboard.
pub fn generate_weekly_text(dashboard: &WeeklyDashboard) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Weekly Targets ({} to {})\n\n",
        dashboard.start, dashboard.end
    ));

    if dashboard.entries_in_window == 0 {
        let days = (dashboard.end - dashboard.start).num_days() + 1;
        output.push_str(&format!("No logs in the last {} days yet.\n", days));
        return output;
    }

    for goal in dashboard.goals() {
        output.push_str(&generate_goal_line(goal));
    }

    output
}

fn generate_goal_line(goal: &GoalProgress) -> String {
    let (total, target) = match goal.metric {
        Metric::Water => (format!("{:.1}", goal.total), format!("{}", goal.goal)),
        _ => (group_thousands(goal.total), group_thousands(goal.goal)),
    };

    let verdict = match (goal.metric, goal.met) {
        (Metric::Steps, true) => "🏃 Step champion! Weekly goal achieved!",
        (Metric::Steps, false) => "👟 Keep walking! You haven't hit your step goal yet.",
        (Metric::Water, true) => "💦 Hydration hero! Weekly water goal achieved!",
        (Metric::Water, false) => "💧 Drink more water to reach your goal this week!",
        (_, true) => "🍽️ Calorie control on point!",
        (_, false) => "⚠️ Calories exceeded weekly target!",
    };

    format!(
        "- {}: {} / {} {} → {}\n",
        goal.metric,
        total,
        target,
        goal.metric.unit(),
        verdict
    )
}

/// Outcome of a weekly reset.
pub fn generate_reset_text(outcome: &ResetOutcome) -> String {
    match outcome {
        ResetOutcome::Cleared { rows } => format!(
            "All daily logs have been reset to 0 ({} rows)! Weekly targets cleared.",
            rows
        ),
        ResetOutcome::AlreadyClear => "Nothing to reset: all logs are already at 0.".to_string(),
    }
}

/// Render any result as pretty JSON.
pub fn generate_json_report<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}

/// Format a whole number with comma separators (35000 → "35,000").
fn group_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::new();

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::WeeklyGoals;
    use crate::categorize::{categorize_calories, compute_bmi};
    use crate::models::{Entry, HeightUnit};
    use crate::store::MemoryStore;
    use crate::tracker::Tracker;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    #[test]
    fn test_generate_logged_line() {
        let line = generate_logged_line(Metric::Calories, &categorize_calories(1800.0));
        assert_eq!(
            line,
            "Calories logged: 1800 kcal → Average human intake 😎 Nothing crazy."
        );
    }

    #[test]
    fn test_generate_bmi_text() {
        let reading = compute_bmi(72.0, 1.8, HeightUnit::Meters).unwrap();
        let text = generate_bmi_text(&reading);
        assert!(text.starts_with("Your BMI is 22.22"));
        assert!(text.contains("Normal"));
    }

    #[test]
    fn test_generate_daily_text() {
        let tracker = Tracker::default();
        let store = MemoryStore::from_entries(vec![
            Entry::new(day(10)).with_calories(1800),
            Entry::new(day(10)).with_water(2.0),
        ]);

        let text = generate_daily_text(&tracker.daily_summary(&store, day(10)));
        assert!(text.contains("- Calories: 1800 kcal"));
        assert!(text.contains("- Water: 2 L → Perfect!"));
        assert!(text.contains("Heart rate not logged."));

        let empty = generate_daily_text(&tracker.daily_summary(&store, day(11)));
        assert!(empty.contains("No logs today yet!"));
    }

    #[test]
    fn test_generate_weekly_text() {
        let entries = vec![
            Entry::new(day(9)).with_steps(36_000),
            Entry::new(day(10)).with_water(3.3).with_calories(13_000),
        ];
        let dashboard = WeeklyDashboard::build(&entries, day(10), 7, &WeeklyGoals::default());
        let text = generate_weekly_text(&dashboard);

        assert!(text.contains("- Steps: 36,000 / 35,000 steps → 🏃 Step champion!"));
        assert!(text.contains("- Water: 3.3 / 14 L"));
        assert!(text.contains("Calories exceeded weekly target!"));

        let empty = WeeklyDashboard::build(&[], day(10), 7, &WeeklyGoals::default());
        assert!(generate_weekly_text(&empty).contains("No logs in the last 7 days yet."));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(12_500.0), "12,500");
        assert_eq!(group_thousands(1_234_567.0), "1,234,567");
    }

    #[test]
    fn test_generate_json_report() {
        let tracker = Tracker::default();
        let store = MemoryStore::from_entries(vec![Entry::new(day(10)).with_steps(4000)]);
        let json = generate_json_report(&tracker.weekly_dashboard(&store, day(10))).unwrap();

        assert!(json.contains("\"entries_in_window\": 1"));
        assert!(json.contains("\"direction\": \"at_least\""));
        assert!(json.contains("\"metric\": \"steps\""));

        let reset = generate_json_report(&ResetOutcome::Cleared { rows: 3 }).unwrap();
        assert!(reset.contains("\"outcome\": \"cleared\""));
    }
}
