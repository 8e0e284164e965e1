//! Body mass index.

use super::{CalcError, round_to};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// WHO adult thresholds.
    pub fn from_value(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal weight",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bmi {
    /// Rounded to one decimal.
    pub value: f64,
    pub category: BmiCategory,
}

impl Bmi {
    fn from_raw(raw: f64) -> Self {
        let value = round_to(raw, 1);
        Self {
            value,
            category: BmiCategory::from_value(value),
        }
    }
}

fn require_positive(value: f64, name: &'static str) -> Result<f64, CalcError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::NonPositive(name))
    }
}

pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<Bmi, CalcError> {
    let weight = require_positive(weight_kg, "weight")?;
    let height_m = require_positive(height_cm, "height")? / 100.0;
    Ok(Bmi::from_raw(weight / (height_m * height_m)))
}

/// Pounds and inches, using the conventional factor of 703.
pub fn calculate_bmi_imperial(weight_lb: f64, height_in: f64) -> Result<Bmi, CalcError> {
    let weight = require_positive(weight_lb, "weight")?;
    let height = require_positive(height_in, "height")?;
    Ok(Bmi::from_raw(703.0 * weight / (height * height)))
}
