//! Tax regimes and their deduction eligibility rules

use std::fmt;

use serde::{Deserialize, Serialize};

use super::brackets::{BracketTable, NEW_REGIME_TABLE, OLD_REGIME_TABLE};

pub const SECTION_80C_CAP: f64 = 150_000.0;
pub const SECTION_80D_CAP: f64 = 25_000.0;
pub const NPS_CAP: f64 = 50_000.0;

/// Mutually exclusive bracket-and-deduction rule sets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    #[serde(rename = "OLD_REGIME", alias = "old", alias = "OLD")]
    Old,
    #[default]
    #[serde(rename = "NEW_REGIME", alias = "new", alias = "NEW")]
    New,
}

impl Regime {
    pub fn brackets(self) -> &'static BracketTable {
        match self {
            Regime::Old => &OLD_REGIME_TABLE,
            Regime::New => &NEW_REGIME_TABLE,
        }
    }

    /// Only the old regime recognises 80C, 80D and NPS deductions
    pub fn allows_deductions(self) -> bool {
        matches!(self, Regime::Old)
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Regime::Old => write!(f, "OLD_REGIME"),
            Regime::New => write!(f, "NEW_REGIME"),
        }
    }
}

/// Deductions after regime eligibility and caps
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EligibleDeductions {
    pub section_80c: f64,
    pub section_80d: f64,
    pub nps: f64,
}

impl EligibleDeductions {
    pub fn total(&self) -> f64 {
        self.section_80c + self.section_80d + self.nps
    }
}

/// Apply the regime rule and the statutory caps to claimed deductions
pub fn eligible_deductions(
    regime: Regime,
    section_80c: f64,
    section_80d: f64,
    nps_contribution: f64,
) -> EligibleDeductions {
    if !regime.allows_deductions() {
        return EligibleDeductions::default();
    }

    EligibleDeductions {
        section_80c: section_80c.clamp(0.0, SECTION_80C_CAP),
        section_80d: section_80d.clamp(0.0, SECTION_80D_CAP),
        nps: nps_contribution.clamp(0.0, NPS_CAP),
    }
}
