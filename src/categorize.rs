//! Fixed-threshold categories for metric values.
//!
//! Every function here is total: bands are checked in ascending order and
//! the first match wins. Zero, negative and NaN inputs fall into the
//! "nothing logged" band (the lowest band for BMI).

use crate::error::ValidationError;
use crate::models::HeightUnit;
use serde::Serialize;
use std::fmt;

/// A categorized value: short label plus display commentary.
pub trait Assessment: Copy + fmt::Debug {
    fn label(&self) -> &'static str;
    fn comment(&self) -> &'static str;
}

/// A value together with its category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading<C> {
    pub value: f64,
    pub category: C,
}

impl<C: Assessment> Reading<C> {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }

    pub fn comment(&self) -> &'static str {
        self.category.comment()
    }
}

macro_rules! display_label {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.label())
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if !(bmi >= 18.5) {
            BmiCategory::Underweight
        } else if bmi < 24.9 {
            BmiCategory::Normal
        } else if bmi < 29.9 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

impl Assessment for BmiCategory {
    fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    fn comment(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight 🥺 Eat a burger!",
            BmiCategory::Normal => "Normal 😎 Looking good!",
            BmiCategory::Overweight => "Overweight 🤔 Maybe skip cake...",
            BmiCategory::Obese => "Obese 😱 Doctor alert!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieLevel {
    NoneLogged,
    Light,
    Average,
    Heavy,
}

impl CalorieLevel {
    pub fn from_calories(calories: f64) -> Self {
        if !(calories > 0.0) {
            CalorieLevel::NoneLogged
        } else if calories < 1500.0 {
            CalorieLevel::Light
        } else if calories < 2500.0 {
            CalorieLevel::Average
        } else {
            CalorieLevel::Heavy
        }
    }
}

impl Assessment for CalorieLevel {
    fn label(&self) -> &'static str {
        match self {
            CalorieLevel::NoneLogged => "None logged",
            CalorieLevel::Light => "Light",
            CalorieLevel::Average => "Average",
            CalorieLevel::Heavy => "Heavy",
        }
    }

    fn comment(&self) -> &'static str {
        match self {
            CalorieLevel::NoneLogged => "No calories logged today 😶 Are you fasting or just forgot?",
            CalorieLevel::Light => "Light eater today 🍃 Good for you!",
            CalorieLevel::Average => "Average human intake 😎 Nothing crazy.",
            CalorieLevel::Heavy => "Whoa! 🍔🍕 Someone's having a feast today!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterLevel {
    None,
    Low,
    Good,
    Overload,
}

impl WaterLevel {
    pub fn from_liters(liters: f64) -> Self {
        if !(liters > 0.0) {
            WaterLevel::None
        } else if liters < 1.5 {
            WaterLevel::Low
        } else if liters < 2.5 {
            WaterLevel::Good
        } else {
            WaterLevel::Overload
        }
    }
}

impl Assessment for WaterLevel {
    fn label(&self) -> &'static str {
        match self {
            WaterLevel::None => "None",
            WaterLevel::Low => "Low",
            WaterLevel::Good => "Good",
            WaterLevel::Overload => "Overload",
        }
    }

    fn comment(&self) -> &'static str {
        match self {
            WaterLevel::None => "Not a drop yet 😱 Go drink something!",
            WaterLevel::Low => "A little hydration, could do better 💦",
            WaterLevel::Good => "Perfect! Keep it flowing 💧",
            WaterLevel::Overload => "Hydration overload! 💦 You're basically a fountain.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepLevel {
    None,
    Few,
    Good,
    Superstar,
}

impl StepLevel {
    pub fn from_steps(steps: f64) -> Self {
        if !(steps > 0.0) {
            StepLevel::None
        } else if steps < 5000.0 {
            StepLevel::Few
        } else if steps < 10_000.0 {
            StepLevel::Good
        } else {
            StepLevel::Superstar
        }
    }
}

impl Assessment for StepLevel {
    fn label(&self) -> &'static str {
        match self {
            StepLevel::None => "None",
            StepLevel::Few => "Few",
            StepLevel::Good => "Good",
            StepLevel::Superstar => "Superstar",
        }
    }

    fn comment(&self) -> &'static str {
        match self {
            StepLevel::None => "Couch potato alert 🥔 Move your legs!",
            StepLevel::Few => "A few steps today 👣 Not bad… barely.",
            StepLevel::Good => "Good job! 🚶 Keep going.",
            StepLevel::Superstar => "Step superstar 👑 Crushing it today!",
        }
    }
}

/// Resting heart rate zone. Zero means the rate was not logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeartRateZone {
    Unlogged,
    Bradycardia,
    Normal,
    Tachycardia,
}

impl HeartRateZone {
    pub fn from_bpm(bpm: f64) -> Self {
        if !(bpm > 0.0) {
            HeartRateZone::Unlogged
        } else if bpm < 60.0 {
            HeartRateZone::Bradycardia
        } else if bpm <= 100.0 {
            HeartRateZone::Normal
        } else {
            HeartRateZone::Tachycardia
        }
    }
}

impl Assessment for HeartRateZone {
    fn label(&self) -> &'static str {
        match self {
            HeartRateZone::Unlogged => "Unlogged",
            HeartRateZone::Bradycardia => "Bradycardia",
            HeartRateZone::Normal => "Normal",
            HeartRateZone::Tachycardia => "Tachycardia",
        }
    }

    fn comment(&self) -> &'static str {
        match self {
            HeartRateZone::Unlogged => "Heart rate not logged.",
            HeartRateZone::Bradycardia => "Bradycardia 🐢",
            HeartRateZone::Normal => "Normal 😎",
            HeartRateZone::Tachycardia => "Tachycardia ⚡",
        }
    }
}

display_label!(BmiCategory);
display_label!(CalorieLevel);
display_label!(WaterLevel);
display_label!(StepLevel);
display_label!(HeartRateZone);

pub fn categorize_calories(calories: f64) -> Reading<CalorieLevel> {
    Reading {
        value: calories,
        category: CalorieLevel::from_calories(calories),
    }
}

pub fn categorize_water(liters: f64) -> Reading<WaterLevel> {
    Reading {
        value: liters,
        category: WaterLevel::from_liters(liters),
    }
}

pub fn categorize_steps(steps: f64) -> Reading<StepLevel> {
    Reading {
        value: steps,
        category: StepLevel::from_steps(steps),
    }
}

pub fn categorize_heart_rate(bpm: f64) -> Reading<HeartRateZone> {
    Reading {
        value: bpm,
        category: HeartRateZone::from_bpm(bpm),
    }
}

/// Result of a body check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BmiReading {
    pub weight_kg: f64,
    pub height_m: f64,
    pub bmi: f64,
    pub category: BmiCategory,
}

/// Body mass index for `weight_kg` and `height` given in `unit`.
///
/// Both inputs must be finite and greater than zero.
pub fn compute_bmi(weight_kg: f64, height: f64, unit: HeightUnit) -> Result<BmiReading, ValidationError> {
    require_positive("weight", weight_kg)?;
    require_positive("height", height)?;

    let height_m = unit.to_meters(height);
    let bmi = weight_kg / (height_m * height_m);

    Ok(BmiReading {
        weight_kg,
        height_m,
        bmi,
        category: BmiCategory::from_bmi(bmi),
    })
}

fn require_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(())
}
