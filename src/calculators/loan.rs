//! Fixed-rate loan payments, compounded monthly.

use super::{CalcError, round_to};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanSummary {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
    pub months: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmortizationRow {
    /// 1-based.
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

struct Terms {
    principal: f64,
    monthly_rate: f64,
    months: u32,
    payment: f64,
}

fn terms(principal: f64, annual_rate_percent: f64, years: u32) -> Result<Terms, CalcError> {
    if !(principal.is_finite() && principal > 0.0) {
        return Err(CalcError::NonPositive("principal"));
    }
    if years == 0 {
        return Err(CalcError::NonPositive("term"));
    }
    if !(annual_rate_percent.is_finite() && annual_rate_percent >= 0.0) {
        return Err(CalcError::NonPositive("interest rate"));
    }

    let months = years * 12;
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let payment = if monthly_rate == 0.0 {
        principal / f64::from(months)
    } else {
        principal * monthly_rate / (1.0 - (1.0 + monthly_rate).powi(-(months as i32)))
    };
    Ok(Terms {
        principal,
        monthly_rate,
        months,
        payment,
    })
}

/// Monthly payment and totals. Amounts are rounded to cents; totals are
/// derived from the unrounded payment.
pub fn calculate_loan(
    principal: f64,
    annual_rate_percent: f64,
    years: u32,
) -> Result<LoanSummary, CalcError> {
    let t = terms(principal, annual_rate_percent, years)?;
    let total = t.payment * f64::from(t.months);
    Ok(LoanSummary {
        monthly_payment: round_to(t.payment, 2),
        total_payment: round_to(total, 2),
        total_interest: round_to(total - t.principal, 2),
        months: t.months,
    })
}

/// One row per month. The last row absorbs rounding drift so the balance
/// ends at zero.
pub fn amortization_schedule(
    principal: f64,
    annual_rate_percent: f64,
    years: u32,
) -> Result<Vec<AmortizationRow>, CalcError> {
    let t = terms(principal, annual_rate_percent, years)?;
    let mut balance = t.principal;
    let mut rows = Vec::with_capacity(t.months as usize);

    for month in 1..=t.months {
        let interest = balance * t.monthly_rate;
        let mut principal_part = t.payment - interest;
        if month == t.months {
            principal_part = balance;
        }
        balance = (balance - principal_part).max(0.0);
        rows.push(AmortizationRow {
            month,
            payment: round_to(principal_part + interest, 2),
            principal: round_to(principal_part, 2),
            interest: round_to(interest, 2),
            balance: round_to(balance, 2),
        });
    }
    Ok(rows)
}
