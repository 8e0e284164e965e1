//! Percentage arithmetic.

use super::CalcError;

/// `percent`% of `value`.
pub fn percent_of(percent: f64, value: f64) -> f64 {
    percent * value / 100.0
}

/// What percentage `part` is of `whole`.
pub fn what_percent(part: f64, whole: f64) -> Result<f64, CalcError> {
    if whole == 0.0 {
        return Err(CalcError::DivisionByZero("whole"));
    }
    Ok(part * 100.0 / whole)
}

/// Relative change from `from` to `to`, in percent. Negative for a decrease.
pub fn percent_change(from: f64, to: f64) -> Result<f64, CalcError> {
    if from == 0.0 {
        return Err(CalcError::DivisionByZero("starting value"));
    }
    Ok((to - from) * 100.0 / from.abs())
}
