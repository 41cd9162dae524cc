//! Finance Engine - Deterministic projections for personal-finance calculators
//!
//! This library provides:
//! - Loan amortization with EMI and yearly principal/interest breakdowns
//! - SIP growth projections, optionally with an annual step-up
//! - Goal planning by inverting the growth projection
//! - Retirement corpus sizing and the monthly investment to reach it
//! - Income tax under the old and new regimes, with regime comparison
//! - Rent-vs-buy cumulative cost comparison
//! - Batch evaluation of tagged JSON requests and CSV export of series
//!
//! All calculators are pure functions of their inputs. Amounts are kept at
//! full precision internally and rounded to 2 decimal places only when a
//! result is exposed.

pub mod error;
pub mod money;
mod validation;
pub mod annuity;
pub mod amortization;
pub mod growth;
pub mod retirement;
pub mod tax;
pub mod rent_vs_buy;
pub mod request;
pub mod runner;
pub mod loader;
pub mod export;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use amortization::{amortize, AmortizationSchedule, LoanTerms};
pub use growth::{plan_goal, project, ContributionPlan, GoalPlan, GrowthProjection};
pub use retirement::{plan_retirement, RetirementInputs, RetirementPlan};
pub use tax::{calculate_tax, compare_regimes, Regime, TaxInputs, TaxResult};
pub use rent_vs_buy::{RentVsBuyInputs, RentVsBuyResult};
pub use request::{CalculationRequest, CalculationResponse};
pub use runner::{CalculatorRunner, RunnerConfig};
