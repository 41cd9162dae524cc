//! Contribution plans and growth outputs

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::money::{self, round_currency};
use crate::validation;

/// Recurring monthly contribution into a compounding instrument (SIP)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContributionPlan {
    /// Contribution per month in the first year
    pub periodic_amount: f64,

    /// Expected annual return in percent
    pub annual_rate_percent: f64,

    /// Investment horizon in whole years
    pub horizon_years: u32,

    /// Yearly increase applied to the contribution amount, in percent
    #[serde(default)]
    pub annual_step_up_percent: f64,
}

impl ContributionPlan {
    /// Flat plan with no step-up
    pub fn new(periodic_amount: f64, annual_rate_percent: f64, horizon_years: u32) -> Self {
        Self {
            periodic_amount,
            annual_rate_percent,
            horizon_years,
            annual_step_up_percent: 0.0,
        }
    }

    pub fn with_step_up(mut self, annual_step_up_percent: f64) -> Self {
        self.annual_step_up_percent = annual_step_up_percent;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validation::positive("periodic_amount", self.periodic_amount)?;
        validation::non_negative("annual_rate_percent", self.annual_rate_percent)?;
        validation::positive_years("horizon_years", self.horizon_years)?;
        validation::non_negative("annual_step_up_percent", self.annual_step_up_percent)?;
        Ok(())
    }

    pub fn monthly_rate(&self) -> f64 {
        money::monthly_rate(self.annual_rate_percent)
    }

    pub fn step_up_rate(&self) -> f64 {
        money::percent_to_rate(self.annual_step_up_percent)
    }

    pub fn total_months(&self) -> u32 {
        money::months_in(self.horizon_years)
    }
}

/// Position of the investment at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSnapshot {
    /// Year index (1-indexed)
    pub year: u32,

    /// Value of the investment including any starting balance
    pub accumulated_value: f64,

    /// Sum of periodic contributions made so far
    pub cumulative_contributed: f64,
}

impl GrowthSnapshot {
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            accumulated_value: round_currency(self.accumulated_value),
            cumulative_contributed: round_currency(self.cumulative_contributed),
        }
    }
}

/// Result of a forward projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProjection {
    /// One snapshot per completed year
    pub snapshots: Vec<GrowthSnapshot>,

    /// Terminal value
    pub maturity_value: f64,

    /// Sum of all periodic contributions
    pub total_contributed: f64,

    /// `maturity_value − total_contributed − starting balance`
    pub estimated_returns: f64,

    /// Contribution paid in the last period (differs from the first under step-up)
    pub final_contribution: f64,
}

impl GrowthProjection {
    pub fn rounded(&self) -> Self {
        Self {
            snapshots: self.snapshots.iter().map(GrowthSnapshot::rounded).collect(),
            maturity_value: round_currency(self.maturity_value),
            total_contributed: round_currency(self.total_contributed),
            estimated_returns: round_currency(self.estimated_returns),
            final_contribution: round_currency(self.final_contribution),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_validation() {
        assert!(ContributionPlan::new(10_000.0, 12.0, 10).validate().is_ok());
        assert!(ContributionPlan::new(10_000.0, 0.0, 10).validate().is_ok());

        let err = ContributionPlan::new(0.0, 12.0, 10).validate().unwrap_err();
        assert_eq!(err.field(), Some("periodic_amount"));

        let err = ContributionPlan::new(100.0, 12.0, 0).validate().unwrap_err();
        assert_eq!(err.field(), Some("horizon_years"));

        let err = ContributionPlan::new(100.0, 12.0, 5)
            .with_step_up(-10.0)
            .validate()
            .unwrap_err();
        assert_eq!(err.field(), Some("annual_step_up_percent"));
    }

    #[test]
    fn test_step_up_defaults_to_zero_when_absent() {
        let json = r#"{"periodic_amount": 5000, "annual_rate_percent": 12, "horizon_years": 10}"#;
        let plan: ContributionPlan = serde_json::from_str(json).unwrap();
        assert_eq!(plan.annual_step_up_percent, 0.0);
        assert_eq!(plan.total_months(), 120);
    }
}
