//! Currency helpers shared by all calculators
//!
//! Amounts are carried at full `f64` precision through every accumulation
//! loop and only rounded to 2 decimal places when a result record is
//! exposed to a consumer.

use crate::error::{ProjectionError, Result};

/// Contribution and payment periods per year
pub const PERIODS_PER_YEAR: u32 = 12;

/// Longest horizon, tenure or age gap accepted by any calculator
pub const MAX_YEARS: u32 = 100;

/// Rates below this are treated as zero by the annuity primitives
pub const RATE_EPSILON: f64 = 1e-12;

/// Round a currency amount to 2 decimal places
pub fn round_currency(amount: f64) -> f64 {
    let scaled = amount * 100.0;
    if !scaled.is_finite() {
        return amount;
    }
    let rounded = scaled.round() / 100.0;
    // Avoid reporting "-0.00"
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Reject NaN and infinite values before they reach a result record
pub fn ensure_finite(field: &'static str, amount: f64) -> Result<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(ProjectionError::NonFinite { field })
    }
}

/// Convert a percentage (e.g. 12.0) to a decimal rate (0.12)
pub fn percent_to_rate(percent: f64) -> f64 {
    percent / 100.0
}

/// Monthly periodic rate for an annual percentage
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    percent_to_rate(annual_rate_percent) / PERIODS_PER_YEAR as f64
}

/// Number of monthly periods in a whole number of years, saturating at `u32::MAX`
pub fn months_in(years: u32) -> u32 {
    years.saturating_mul(PERIODS_PER_YEAR)
}
