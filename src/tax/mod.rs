//! Progressive income tax under the old and new regimes
//!
//! Each regime is a bracket table evaluated by a single generic function.
//! Deductions (80C, 80D, NPS) are capped and only recognised under the old
//! regime.

mod brackets;
mod regime;
mod calculator;

pub use brackets::{BracketTable, TaxBracket, NEW_REGIME_TABLE, OLD_REGIME_TABLE};
pub use regime::{eligible_deductions, EligibleDeductions, Regime, NPS_CAP, SECTION_80C_CAP, SECTION_80D_CAP};
pub use calculator::{calculate_tax, compare_regimes, tax_for_regime, RegimeComparison, TaxInputs, TaxResult};
