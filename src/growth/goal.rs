//! Goal planner: required monthly investment for a target amount

use log::debug;
use serde::{Deserialize, Serialize};

use super::plan::{ContributionPlan, GrowthSnapshot};
use super::projector::{accumulate, required_monthly_contribution};
use crate::annuity::future_value_lump_sum;
use crate::error::Result;
use crate::money::{self, ensure_finite, round_currency};
use crate::validation;

/// Target amount to accumulate over a horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub target_amount: f64,
    pub horizon_years: u32,
    pub annual_rate_percent: f64,

    /// Amount already invested towards the goal
    #[serde(default)]
    pub starting_savings: f64,
}

impl GoalPlan {
    pub fn new(target_amount: f64, horizon_years: u32, annual_rate_percent: f64) -> Self {
        Self {
            target_amount,
            horizon_years,
            annual_rate_percent,
            starting_savings: 0.0,
        }
    }

    pub fn with_starting_savings(mut self, starting_savings: f64) -> Self {
        self.starting_savings = starting_savings;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validation::positive("target_amount", self.target_amount)?;
        validation::positive_years("horizon_years", self.horizon_years)?;
        validation::non_negative("annual_rate_percent", self.annual_rate_percent)?;
        validation::non_negative("starting_savings", self.starting_savings)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalResult {
    pub required_monthly_contribution: f64,

    /// Monthly contributions over the horizon plus starting savings
    pub total_contribution: f64,

    /// `target_amount − total_contribution`
    pub estimated_returns: f64,

    /// Starting savings compounded to the end of the horizon
    pub future_value_of_savings: f64,

    pub snapshots: Vec<GrowthSnapshot>,
}

impl GoalResult {
    pub fn rounded(&self) -> Self {
        Self {
            required_monthly_contribution: round_currency(self.required_monthly_contribution),
            total_contribution: round_currency(self.total_contribution),
            estimated_returns: round_currency(self.estimated_returns),
            future_value_of_savings: round_currency(self.future_value_of_savings),
            snapshots: self.snapshots.iter().map(GrowthSnapshot::rounded).collect(),
        }
    }
}

/// Solve for the monthly contribution and project the resulting path
pub fn plan_goal(goal: &GoalPlan) -> Result<GoalResult> {
    goal.validate()?;

    let contribution = required_monthly_contribution(
        goal.target_amount,
        goal.starting_savings,
        goal.annual_rate_percent,
        goal.horizon_years,
    )?;

    let months = money::months_in(goal.horizon_years);
    let future_value_of_savings = ensure_finite(
        "future_value_of_savings",
        future_value_lump_sum(
            goal.starting_savings,
            money::monthly_rate(goal.annual_rate_percent),
            months,
        ),
    )?;

    let plan = ContributionPlan::new(contribution, goal.annual_rate_percent, goal.horizon_years);
    let projection = accumulate(&plan, goal.starting_savings)?;

    let total_contribution = ensure_finite(
        "total_contribution",
        contribution * months as f64 + goal.starting_savings,
    )?;
    debug!(
        "goal {:.2} in {} years needs {:.2}/month",
        goal.target_amount, goal.horizon_years, contribution
    );

    Ok(GoalResult {
        required_monthly_contribution: contribution,
        total_contribution,
        estimated_returns: goal.target_amount - total_contribution,
        future_value_of_savings,
        snapshots: projection.snapshots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::annuity::annuity_factor;
    use crate::error::ProjectionError;

    #[test]
    fn test_reference_goal() {
        let result = plan_goal(&GoalPlan::new(5_000_000.0, 15, 10.0)).unwrap();

        let expected = 5_000_000.0 / annuity_factor(0.10 / 12.0, 180);
        assert_abs_diff_eq!(result.required_monthly_contribution, expected, epsilon = 1e-6);
        assert!(result.required_monthly_contribution > 11_000.0);
        assert!(result.required_monthly_contribution < 13_000.0);

        assert_eq!(result.snapshots.len(), 15);
        let terminal = result.snapshots.last().unwrap().accumulated_value;
        assert_abs_diff_eq!(terminal, 5_000_000.0, epsilon = 0.01);
        assert_abs_diff_eq!(
            result.total_contribution,
            result.required_monthly_contribution * 180.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_goal_met_by_savings() {
        let goal = GoalPlan::new(100_000.0, 10, 8.0).with_starting_savings(60_000.0);
        let result = plan_goal(&goal).unwrap();

        assert_eq!(result.required_monthly_contribution, 0.0);
        assert!(result.future_value_of_savings > goal.target_amount);
        assert_abs_diff_eq!(result.total_contribution, 60_000.0, epsilon = 1e-9);
        assert!(result
            .snapshots
            .iter()
            .all(|s| s.cumulative_contributed == 0.0));
    }

    #[test]
    fn test_zero_rate_goal() {
        let result = plan_goal(&GoalPlan::new(240_000.0, 10, 0.0)).unwrap();
        assert_abs_diff_eq!(result.required_monthly_contribution, 2_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.estimated_returns, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_goal_validation() {
        let err = plan_goal(&GoalPlan::new(0.0, 10, 8.0)).unwrap_err();
        assert_eq!(err.field(), Some("target_amount"));

        let err = plan_goal(&GoalPlan::new(1000.0, 0, 8.0)).unwrap_err();
        assert_eq!(err.field(), Some("horizon_years"));

        let err = plan_goal(&GoalPlan::new(1000.0, 400_000_000, 8.0)).unwrap_err();
        assert_eq!(err.field(), Some("horizon_years"));
    }

    #[test]
    fn test_overflowing_savings_are_not_finite() {
        let goal = GoalPlan::new(1e308, 10, 12.0).with_starting_savings(1e308);
        let err = plan_goal(&goal).unwrap_err();
        assert!(matches!(err, ProjectionError::NonFinite { .. }));
    }
}
