//! Loan terms supplied to the scheduler

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::money;
use crate::validation;

/// Fixed-rate loan parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: f64,

    /// Nominal annual interest rate in percent (10.0 = 10%)
    pub annual_rate_percent: f64,

    /// Loan tenure in whole years
    pub tenure_years: u32,
}

impl LoanTerms {
    pub fn new(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_years,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validation::positive("principal", self.principal)?;
        validation::non_negative("annual_rate_percent", self.annual_rate_percent)?;
        validation::positive_years("tenure_years", self.tenure_years)?;
        Ok(())
    }

    /// Monthly periodic rate as a decimal
    pub fn monthly_rate(&self) -> f64 {
        money::monthly_rate(self.annual_rate_percent)
    }

    /// Nominal number of monthly installments
    pub fn total_months(&self) -> u32 {
        money::months_in(self.tenure_years)
    }
}
