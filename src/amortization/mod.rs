//! Loan amortization for the EMI calculator and the buy path of rent-vs-buy

mod terms;
mod schedule;
mod scheduler;

pub use terms::LoanTerms;
pub use schedule::{AmortizationEntry, AmortizationSchedule, LoanComposition, YearlyAmortization};
pub use scheduler::{amortize, BALANCE_EPSILON};
