//! Annuity primitives shared by the loan, growth and retirement calculators
//!
//! All three functions take a periodic (not annual) rate as a decimal and a
//! whole number of periods. A positive rate always yields a factor that is
//! non-decreasing in `periods`.

use crate::error::{ProjectionError, Result};
use crate::money::RATE_EPSILON;

/// `(1+r)^n` without truncating period counts beyond `i32::MAX`
fn compound(periodic_rate: f64, periods: u32) -> f64 {
    let base = 1.0 + periodic_rate;
    match i32::try_from(periods) {
        Ok(n) => base.powi(n),
        Err(_) => base.powf(periods as f64),
    }
}

/// Level payment that fully amortizes `principal` over `periods`
///
/// `P·r·(1+r)^n / ((1+r)^n − 1)`, falling back to `P / n` when the rate is
/// zero.
pub fn fixed_payment(principal: f64, periodic_rate: f64, periods: u32) -> Result<f64> {
    if periods == 0 {
        return Err(ProjectionError::domain(
            "fixed_payment",
            "periods must be at least 1",
        ));
    }

    let n = periods as f64;
    if periodic_rate.abs() < RATE_EPSILON {
        return Ok(principal / n);
    }

    let growth = compound(periodic_rate, periods);
    Ok(principal * periodic_rate * growth / (growth - 1.0))
}

/// Annuity-due accumulation factor
///
/// Future value of one unit contributed at the start of each of `periods`
/// periods: `((1+r)^n − 1)/r · (1+r)`. Equals `periods` when the rate is zero.
pub fn annuity_factor(periodic_rate: f64, periods: u32) -> f64 {
    if periodic_rate.abs() < RATE_EPSILON {
        return periods as f64;
    }

    let growth = compound(periodic_rate, periods);
    (growth - 1.0) / periodic_rate * (1.0 + periodic_rate)
}

/// Compound a single amount forward: `amount·(1+r)^n`
pub fn future_value_lump_sum(amount: f64, periodic_rate: f64, periods: u32) -> f64 {
    amount * compound(periodic_rate, periods)
}
