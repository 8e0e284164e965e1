//! Credit-weighted grade point average on a 4.0 scale.

use super::{CalcError, round_to};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub grade: String,
    pub credits: f64,
}

impl Course {
    pub fn new(grade: impl Into<String>, credits: f64) -> Self {
        Self {
            grade: grade.into(),
            credits,
        }
    }

    /// Parse `GRADE:CREDITS`, e.g. `A-:3` or `b+:4.5`.
    pub fn parse(input: &str) -> Result<Self, CalcError> {
        let invalid = || CalcError::InvalidCourse(input.to_string());
        let (grade, credits) = input.trim().split_once(':').ok_or_else(invalid)?;
        let credits: f64 = credits.trim().parse().map_err(|_| invalid())?;
        if !credits.is_finite() || credits < 0.0 {
            return Err(invalid());
        }
        let grade = grade.trim().to_ascii_uppercase();
        grade_points(&grade)?;
        Ok(Self { grade, credits })
    }
}

impl FromStr for Course {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Points for a letter grade, case-insensitive.
pub fn grade_points(grade: &str) -> Result<f64, CalcError> {
    let points = match grade.trim().to_ascii_uppercase().as_str() {
        "A+" | "A" => 4.0,
        "A-" => 3.7,
        "B+" => 3.3,
        "B" => 3.0,
        "B-" => 2.7,
        "C+" => 2.3,
        "C" => 2.0,
        "C-" => 1.7,
        "D+" => 1.3,
        "D" => 1.0,
        "D-" => 0.7,
        "F" => 0.0,
        _ => return Err(CalcError::UnknownGrade(grade.to_string())),
    };
    Ok(points)
}

/// Rounded to two decimals.
pub fn calculate_gpa(courses: &[Course]) -> Result<f64, CalcError> {
    let mut points = 0.0;
    let mut credits = 0.0;
    for course in courses {
        if !course.credits.is_finite() || course.credits < 0.0 {
            return Err(CalcError::InvalidCourse(format!(
                "{}:{}",
                course.grade, course.credits
            )));
        }
        points += grade_points(&course.grade)? * course.credits;
        credits += course.credits;
    }
    if credits <= 0.0 {
        return Err(CalcError::NoCredits);
    }
    Ok(round_to(points / credits, 2))
}
