//! Everyday calculators.
//!
//! | Calculator | Entry point |
//! |---|---|
//! | Age | [`calculate_age`] |
//! | BMI | [`calculate_bmi`], [`calculate_bmi_imperial`] |
//! | Loan | [`calculate_loan`], [`amortization_schedule`] |
//! | Percentage | [`percent_of`], [`what_percent`], [`percent_change`] |
//! | GPA | [`calculate_gpa`] |
//!
//! All of them validate their inputs and return [`CalcError`] rather than
//! producing NaN or infinity.

mod age;
mod bmi;
mod gpa;
mod loan;
mod percentage;

pub use age::{Age, CivilDate, calculate_age};
pub use bmi::{Bmi, BmiCategory, calculate_bmi, calculate_bmi_imperial};
pub use gpa::{Course, calculate_gpa, grade_points};
pub use loan::{AmortizationRow, LoanSummary, amortization_schedule, calculate_loan};
pub use percentage::{percent_change, percent_of, what_percent};

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("invalid date: {0:?} (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("birth date {birth} is after {on}")]
    BirthAfterDate { birth: CivilDate, on: CivilDate },
    #[error("system clock is before 1970-01-01")]
    Clock,
    #[error("{0} must be greater than zero")]
    NonPositive(&'static str),
    #[error("{0} must not be zero")]
    DivisionByZero(&'static str),
    #[error("unknown letter grade: {0:?}")]
    UnknownGrade(String),
    #[error("invalid course: {0:?} (expected GRADE:CREDITS, e.g. A-:3)")]
    InvalidCourse(String),
    #[error("total credits must be greater than zero")]
    NoCredits,
}

/// Round to `places` decimal places, half away from zero.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
