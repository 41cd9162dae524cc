//! Input checks shared by every calculator entry point

use crate::error::{ProjectionError, Result};
use crate::money::MAX_YEARS;

pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ProjectionError::validation(field, "must be a finite number"))
    }
}

pub(crate) fn positive(field: &'static str, value: f64) -> Result<f64> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ProjectionError::validation(field, "must be greater than 0"))
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<f64> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ProjectionError::validation(field, "must not be negative"))
    }
}

pub(crate) fn positive_years(field: &'static str, years: u32) -> Result<u32> {
    if years == 0 {
        Err(ProjectionError::validation(field, "must be at least 1 year"))
    } else if years > MAX_YEARS {
        Err(ProjectionError::validation(
            field,
            format!("must be at most {} years", MAX_YEARS),
        ))
    } else {
        Ok(years)
    }
}
