//! Marginal tax bracket tables
//!
//! Boundaries and rates are compiled in. Each regime is an ordered list of
//! brackets evaluated by one generic function.

use serde::Serialize;

/// One marginal band: income above `lower` (and up to `upper`) taxed at `rate`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaxBracket {
    pub lower: f64,
    /// `None` for the unbounded top band
    pub upper: Option<f64>,
    pub rate: f64,
}

impl TaxBracket {
    pub const fn new(lower: f64, upper: Option<f64>, rate: f64) -> Self {
        Self { lower, upper, rate }
    }

    /// Tax contributed by this band: `min(excess, width)·rate`
    pub fn tax_on(&self, income: f64) -> f64 {
        let excess = (income - self.lower).max(0.0);
        let taxed = match self.upper {
            Some(upper) => excess.min(upper - self.lower),
            None => excess,
        };
        taxed * self.rate
    }
}

/// Ordered bracket list for one regime
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketTable {
    brackets: &'static [TaxBracket],
}

impl BracketTable {
    pub const fn new(brackets: &'static [TaxBracket]) -> Self {
        Self { brackets }
    }

    pub fn brackets(&self) -> &'static [TaxBracket] {
        self.brackets
    }

    /// Total tax on `taxable_income`; zero for non-positive income
    pub fn tax(&self, taxable_income: f64) -> f64 {
        if taxable_income <= 0.0 {
            return 0.0;
        }
        self.brackets.iter().map(|b| b.tax_on(taxable_income)).sum()
    }

    /// Rate of the unbounded top band
    pub fn top_rate(&self) -> f64 {
        self.brackets.last().map(|b| b.rate).unwrap_or(0.0)
    }
}

const OLD_BRACKETS: [TaxBracket; 4] = [
    TaxBracket::new(0.0, Some(250_000.0), 0.0),
    TaxBracket::new(250_000.0, Some(500_000.0), 0.05),
    TaxBracket::new(500_000.0, Some(1_000_000.0), 0.20),
    TaxBracket::new(1_000_000.0, None, 0.30),
];

const NEW_BRACKETS: [TaxBracket; 6] = [
    TaxBracket::new(0.0, Some(300_000.0), 0.0),
    TaxBracket::new(300_000.0, Some(700_000.0), 0.05),
    TaxBracket::new(700_000.0, Some(1_000_000.0), 0.10),
    TaxBracket::new(1_000_000.0, Some(1_200_000.0), 0.15),
    TaxBracket::new(1_200_000.0, Some(1_500_000.0), 0.20),
    TaxBracket::new(1_500_000.0, None, 0.30),
];

pub const OLD_REGIME_TABLE: BracketTable = BracketTable::new(&OLD_BRACKETS);
pub const NEW_REGIME_TABLE: BracketTable = BracketTable::new(&NEW_BRACKETS);
