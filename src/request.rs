//! Request and response records for every calculator
//!
//! A request names its calculator in the `calculator` field and carries the
//! calculator's inputs alongside it:
//!
//! ```json
//! { "calculator": "emi", "principal": 2500000, "annual_rate_percent": 8.5, "tenure_years": 20 }
//! ```

use serde::{Deserialize, Serialize};

use crate::amortization::{amortize, AmortizationSchedule, LoanTerms};
use crate::error::Result;
use crate::growth::{plan_goal, project, ContributionPlan, GoalPlan, GoalResult, GrowthProjection};
use crate::rent_vs_buy::{self, RentVsBuyInputs, RentVsBuyResult};
use crate::retirement::{plan_retirement, RetirementInputs, RetirementPlan};
use crate::tax::{calculate_tax, compare_regimes, RegimeComparison, TaxInputs, TaxResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationRequest {
    Emi(LoanTerms),
    Sip(ContributionPlan),
    Goal(GoalPlan),
    Retirement(RetirementInputs),
    Tax(TaxInputs),
    TaxComparison(TaxInputs),
    RentVsBuy(RentVsBuyInputs),
}

impl CalculationRequest {
    /// Calculator name as it appears in the `calculator` field
    pub fn calculator(&self) -> &'static str {
        match self {
            Self::Emi(_) => "emi",
            Self::Sip(_) => "sip",
            Self::Goal(_) => "goal",
            Self::Retirement(_) => "retirement",
            Self::Tax(_) => "tax",
            Self::TaxComparison(_) => "tax-comparison",
            Self::RentVsBuy(_) => "rent-vs-buy",
        }
    }

    /// Check the inputs without running the calculator
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Emi(terms) => terms.validate(),
            Self::Sip(plan) => plan.validate(),
            Self::Goal(goal) => goal.validate(),
            Self::Retirement(inputs) => inputs.validate(),
            Self::Tax(inputs) | Self::TaxComparison(inputs) => inputs.validate(),
            Self::RentVsBuy(inputs) => inputs.validate(),
        }
    }

    /// Run the calculator at full precision
    pub fn evaluate(&self) -> Result<CalculationResponse> {
        Ok(match self {
            Self::Emi(terms) => CalculationResponse::Emi(amortize(terms)?),
            Self::Sip(plan) => CalculationResponse::Sip(project(plan)?),
            Self::Goal(goal) => CalculationResponse::Goal(plan_goal(goal)?),
            Self::Retirement(inputs) => CalculationResponse::Retirement(plan_retirement(inputs)?),
            Self::Tax(inputs) => CalculationResponse::Tax(calculate_tax(inputs)?),
            Self::TaxComparison(inputs) => {
                CalculationResponse::TaxComparison(compare_regimes(inputs)?)
            }
            Self::RentVsBuy(inputs) => CalculationResponse::RentVsBuy(rent_vs_buy::compare(inputs)?),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "kebab-case")]
pub enum CalculationResponse {
    Emi(AmortizationSchedule),
    Sip(GrowthProjection),
    Goal(GoalResult),
    Retirement(RetirementPlan),
    Tax(TaxResult),
    TaxComparison(RegimeComparison),
    RentVsBuy(RentVsBuyResult),
}

impl CalculationResponse {
    pub fn calculator(&self) -> &'static str {
        match self {
            Self::Emi(_) => "emi",
            Self::Sip(_) => "sip",
            Self::Goal(_) => "goal",
            Self::Retirement(_) => "retirement",
            Self::Tax(_) => "tax",
            Self::TaxComparison(_) => "tax-comparison",
            Self::RentVsBuy(_) => "rent-vs-buy",
        }
    }

    /// Whether the result carries a yearly or monthly series
    pub fn has_series(&self) -> bool {
        !matches!(self, Self::Tax(_) | Self::TaxComparison(_))
    }

    /// Copy with every currency amount rounded to 2 decimal places
    pub fn rounded(&self) -> Self {
        match self {
            Self::Emi(r) => Self::Emi(r.rounded()),
            Self::Sip(r) => Self::Sip(r.rounded()),
            Self::Goal(r) => Self::Goal(r.rounded()),
            Self::Retirement(r) => Self::Retirement(r.rounded()),
            Self::Tax(r) => Self::Tax(r.rounded()),
            Self::TaxComparison(r) => Self::TaxComparison(r.rounded()),
            Self::RentVsBuy(r) => Self::RentVsBuy(r.rounded()),
        }
    }
}
