//! Retirement planner
//!
//! Sizes a retirement corpus from today's salary and expense ratio, then
//! solves for the monthly investment that reaches it on top of current
//! savings:
//! 1. Today's monthly expense is `salary / 12 × expense_ratio`
//! 2. It is inflated annually to the retirement date
//! 3. The corpus is 25 times the annual expense at retirement
//! 4. The goal-seeking projector gives the monthly contribution, net of the
//!    future value of current savings
//! 5. The forward projector produces the year-by-year corpus path

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::annuity::future_value_lump_sum;
use crate::error::{ProjectionError, Result};
use crate::growth::{accumulate, required_contribution, ContributionPlan};
use crate::money::{self, ensure_finite, round_currency, PERIODS_PER_YEAR};
use crate::validation;

/// Corpus as a multiple of the annual expense at retirement
pub const CORPUS_EXPENSE_MULTIPLE: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub retirement_age: u32,
    pub annual_salary: f64,
    #[serde(default)]
    pub current_savings: f64,
    pub inflation_percent: f64,
    pub expected_return_percent: f64,

    /// Share of today's salary needed as expenses in retirement, in (0, 1]
    pub expense_ratio: f64,
}

impl RetirementInputs {
    pub fn validate(&self) -> Result<()> {
        if self.retirement_age <= self.current_age {
            return Err(ProjectionError::validation(
                "retirement_age",
                "must be greater than current_age (no time to plan)",
            ));
        }
        validation::positive_years("retirement_age", self.years_to_retirement())?;
        validation::positive("annual_salary", self.annual_salary)?;
        validation::non_negative("current_savings", self.current_savings)?;
        validation::non_negative("inflation_percent", self.inflation_percent)?;
        validation::non_negative("expected_return_percent", self.expected_return_percent)?;
        validation::positive("expense_ratio", self.expense_ratio)?;
        if self.expense_ratio > 1.0 {
            return Err(ProjectionError::validation(
                "expense_ratio",
                "must not exceed 1",
            ));
        }
        Ok(())
    }

    pub fn years_to_retirement(&self) -> u32 {
        self.retirement_age.saturating_sub(self.current_age)
    }
}

/// Projected corpus against the required corpus at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusPoint {
    pub year: u32,
    pub projected_corpus: f64,
    pub required_corpus: f64,
}

impl CorpusPoint {
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            projected_corpus: round_currency(self.projected_corpus),
            required_corpus: round_currency(self.required_corpus),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementPlan {
    pub years_to_retirement: u32,
    pub monthly_expense_today: f64,
    pub monthly_expense_at_retirement: f64,
    pub required_corpus: f64,

    /// Current savings compounded to the retirement date
    pub future_value_of_savings: f64,

    pub monthly_contribution_needed: f64,

    /// Monthly contributions until retirement plus current savings
    pub total_investment_needed: f64,

    /// Part of the corpus covered by current savings alone
    pub covered_by_savings: f64,

    /// Part of the corpus left to fund through contributions
    pub to_be_funded: f64,

    pub corpus_path: Vec<CorpusPoint>,
}

impl RetirementPlan {
    pub fn rounded(&self) -> Self {
        Self {
            years_to_retirement: self.years_to_retirement,
            monthly_expense_today: round_currency(self.monthly_expense_today),
            monthly_expense_at_retirement: round_currency(self.monthly_expense_at_retirement),
            required_corpus: round_currency(self.required_corpus),
            future_value_of_savings: round_currency(self.future_value_of_savings),
            monthly_contribution_needed: round_currency(self.monthly_contribution_needed),
            total_investment_needed: round_currency(self.total_investment_needed),
            covered_by_savings: round_currency(self.covered_by_savings),
            to_be_funded: round_currency(self.to_be_funded),
            corpus_path: self.corpus_path.iter().map(CorpusPoint::rounded).collect(),
        }
    }
}

pub fn plan_retirement(inputs: &RetirementInputs) -> Result<RetirementPlan> {
    inputs.validate()?;

    let years = inputs.years_to_retirement();
    let months = money::months_in(years);
    let inflation = money::percent_to_rate(inputs.inflation_percent);
    let monthly_rate = money::monthly_rate(inputs.expected_return_percent);

    let monthly_expense_today =
        inputs.annual_salary / PERIODS_PER_YEAR as f64 * inputs.expense_ratio;
    let monthly_expense_at_retirement = ensure_finite(
        "monthly_expense_at_retirement",
        monthly_expense_today * (1.0 + inflation).powi(years as i32),
    )?;
    let required_corpus = ensure_finite(
        "required_corpus",
        monthly_expense_at_retirement * PERIODS_PER_YEAR as f64 * CORPUS_EXPENSE_MULTIPLE,
    )?;

    let future_value_of_savings = ensure_finite(
        "future_value_of_savings",
        future_value_lump_sum(inputs.current_savings, monthly_rate, months),
    )?;
    let contribution =
        required_contribution(required_corpus, inputs.current_savings, monthly_rate, months)?;
    if contribution == 0.0 {
        warn!(
            "current savings of {:.2} already cover the required corpus of {:.2}",
            inputs.current_savings, required_corpus
        );
    }

    let plan = ContributionPlan::new(contribution, inputs.expected_return_percent, years);
    let projection = accumulate(&plan, inputs.current_savings)?;
    let corpus_path = projection
        .snapshots
        .iter()
        .map(|s| CorpusPoint {
            year: s.year,
            projected_corpus: s.accumulated_value,
            required_corpus,
        })
        .collect();

    debug!(
        "retirement in {} years: corpus {:.2}, contribution {:.2}/month",
        years, required_corpus, contribution
    );

    Ok(RetirementPlan {
        years_to_retirement: years,
        monthly_expense_today,
        monthly_expense_at_retirement,
        required_corpus,
        future_value_of_savings,
        monthly_contribution_needed: contribution,
        total_investment_needed: ensure_finite(
            "total_investment_needed",
            contribution * months as f64 + inputs.current_savings,
        )?,
        covered_by_savings: future_value_of_savings.min(required_corpus),
        to_be_funded: (required_corpus - future_value_of_savings).max(0.0),
        corpus_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn sample_inputs() -> RetirementInputs {
        RetirementInputs {
            current_age: 30,
            retirement_age: 60,
            annual_salary: 1_200_000.0,
            current_savings: 500_000.0,
            inflation_percent: 6.0,
            expected_return_percent: 12.0,
            expense_ratio: 0.8,
        }
    }

    #[test]
    fn test_corpus_sizing() {
        let plan = plan_retirement(&sample_inputs()).unwrap();

        assert_eq!(plan.years_to_retirement, 30);
        assert_relative_eq!(plan.monthly_expense_today, 80_000.0);
        let inflated = 80_000.0 * 1.06_f64.powi(30);
        assert_relative_eq!(plan.monthly_expense_at_retirement, inflated, max_relative = 1e-12);
        assert_relative_eq!(plan.required_corpus, inflated * 12.0 * 25.0, max_relative = 1e-12);
    }

    #[test]
    fn test_projected_path_reaches_required_corpus() {
        let plan = plan_retirement(&sample_inputs()).unwrap();

        assert_eq!(plan.corpus_path.len(), 30);
        let last = plan.corpus_path.last().unwrap();
        assert_relative_eq!(last.projected_corpus, plan.required_corpus, max_relative = 1e-9);
        assert!(plan
            .corpus_path
            .iter()
            .all(|p| p.required_corpus == plan.required_corpus));
        assert_relative_eq!(
            plan.covered_by_savings + plan.to_be_funded,
            plan.required_corpus,
            max_relative = 1e-12
        );
        assert_abs_diff_eq!(
            plan.total_investment_needed,
            plan.monthly_contribution_needed * 360.0 + 500_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_savings_cover_corpus() {
        let inputs = RetirementInputs {
            current_savings: 500_000_000.0,
            ..sample_inputs()
        };
        let plan = plan_retirement(&inputs).unwrap();

        assert_eq!(plan.monthly_contribution_needed, 0.0);
        assert_eq!(plan.to_be_funded, 0.0);
        assert_relative_eq!(plan.covered_by_savings, plan.required_corpus);
    }

    #[test]
    fn test_zero_return_uses_linear_factor() {
        let inputs = RetirementInputs {
            current_savings: 0.0,
            inflation_percent: 0.0,
            expected_return_percent: 0.0,
            ..sample_inputs()
        };
        let plan = plan_retirement(&inputs).unwrap();

        // 80,000 × 12 × 25 spread over 360 months
        assert_relative_eq!(plan.required_corpus, 24_000_000.0);
        assert_relative_eq!(plan.monthly_contribution_needed, 24_000_000.0 / 360.0);
    }

    #[test]
    fn test_no_time_to_plan() {
        let inputs = RetirementInputs {
            retirement_age: 30,
            ..sample_inputs()
        };
        let err = plan_retirement(&inputs).unwrap_err();
        assert_eq!(err.field(), Some("retirement_age"));
        assert!(err.to_string().contains("no time to plan"));
    }

    #[test]
    fn test_age_gap_is_bounded() {
        let inputs = RetirementInputs {
            current_age: 0,
            retirement_age: 400_000_000,
            ..sample_inputs()
        };
        let err = plan_retirement(&inputs).unwrap_err();
        assert!(matches!(err, ProjectionError::Validation { field: "retirement_age", .. }));
    }

    #[test]
    fn test_runaway_inflation_is_not_finite() {
        let inputs = RetirementInputs {
            current_age: 20,
            retirement_age: 60,
            inflation_percent: 1e10,
            ..sample_inputs()
        };
        let err = plan_retirement(&inputs).unwrap_err();
        assert!(matches!(err, ProjectionError::NonFinite { .. }));
    }

    #[test]
    fn test_expense_ratio_bounds() {
        for ratio in [0.0, 1.5, f64::NAN] {
            let inputs = RetirementInputs {
                expense_ratio: ratio,
                ..sample_inputs()
            };
            let err = plan_retirement(&inputs).unwrap_err();
            assert_eq!(err.field(), Some("expense_ratio"));
        }
    }
}
