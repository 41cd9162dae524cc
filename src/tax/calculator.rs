//! Income tax with and without deductions

use log::debug;
use serde::{Deserialize, Serialize};

use super::regime::{eligible_deductions, Regime};
use crate::error::Result;
use crate::money::round_currency;
use crate::validation;

/// Tax on an amount of taxable income under a regime's bracket table
pub fn tax_for_regime(taxable_income: f64, regime: Regime) -> f64 {
    regime.brackets().tax(taxable_income)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxInputs {
    pub gross_income: f64,
    pub regime: Regime,
    #[serde(default)]
    pub section_80c: f64,
    #[serde(default)]
    pub section_80d: f64,
    #[serde(default)]
    pub nps_contribution: f64,
}

impl TaxInputs {
    pub fn new(gross_income: f64, regime: Regime) -> Self {
        Self {
            gross_income,
            regime,
            section_80c: 0.0,
            section_80d: 0.0,
            nps_contribution: 0.0,
        }
    }

    pub fn with_deductions(mut self, section_80c: f64, section_80d: f64, nps_contribution: f64) -> Self {
        self.section_80c = section_80c;
        self.section_80d = section_80d;
        self.nps_contribution = nps_contribution;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validation::positive("gross_income", self.gross_income)?;
        validation::non_negative("section_80c", self.section_80c)?;
        validation::non_negative("section_80d", self.section_80d)?;
        validation::non_negative("nps_contribution", self.nps_contribution)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,
    pub gross_income: f64,
    pub eligible_80c: f64,
    pub eligible_80d: f64,
    pub eligible_nps: f64,
    pub total_deductions: f64,
    pub taxable_income: f64,

    /// Tax on gross income
    pub tax_before_deductions: f64,

    /// Tax on taxable income; the amount actually payable
    pub tax_after_deductions: f64,

    pub tax_savings: f64,

    /// Payable tax as a percentage of gross income
    pub effective_rate_percent: f64,

    pub take_home: f64,
}

impl TaxResult {
    pub fn rounded(&self) -> Self {
        Self {
            regime: self.regime,
            gross_income: round_currency(self.gross_income),
            eligible_80c: round_currency(self.eligible_80c),
            eligible_80d: round_currency(self.eligible_80d),
            eligible_nps: round_currency(self.eligible_nps),
            total_deductions: round_currency(self.total_deductions),
            taxable_income: round_currency(self.taxable_income),
            tax_before_deductions: round_currency(self.tax_before_deductions),
            tax_after_deductions: round_currency(self.tax_after_deductions),
            tax_savings: round_currency(self.tax_savings),
            effective_rate_percent: round_currency(self.effective_rate_percent),
            take_home: round_currency(self.take_home),
        }
    }
}

pub fn calculate_tax(inputs: &TaxInputs) -> Result<TaxResult> {
    inputs.validate()?;

    let deductions = eligible_deductions(
        inputs.regime,
        inputs.section_80c,
        inputs.section_80d,
        inputs.nps_contribution,
    );
    let total_deductions = deductions.total();
    let taxable_income = (inputs.gross_income - total_deductions).max(0.0);

    let tax_before_deductions = tax_for_regime(inputs.gross_income, inputs.regime);
    let tax_after_deductions = tax_for_regime(taxable_income, inputs.regime);

    debug!(
        "{}: taxable {:.2} of {:.2}, tax {:.2}",
        inputs.regime, taxable_income, inputs.gross_income, tax_after_deductions
    );

    Ok(TaxResult {
        regime: inputs.regime,
        gross_income: inputs.gross_income,
        eligible_80c: deductions.section_80c,
        eligible_80d: deductions.section_80d,
        eligible_nps: deductions.nps,
        total_deductions,
        taxable_income,
        tax_before_deductions,
        tax_after_deductions,
        tax_savings: tax_before_deductions - tax_after_deductions,
        effective_rate_percent: tax_after_deductions / inputs.gross_income * 100.0,
        take_home: inputs.gross_income - tax_after_deductions,
    })
}

/// The same income and claims evaluated under both regimes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old_regime: TaxResult,
    pub new_regime: TaxResult,

    /// Regime with the lower payable tax; the new regime on a tie
    pub recommended: Regime,

    /// Absolute difference in payable tax
    pub difference: f64,
}

impl RegimeComparison {
    pub fn rounded(&self) -> Self {
        Self {
            old_regime: self.old_regime.rounded(),
            new_regime: self.new_regime.rounded(),
            recommended: self.recommended,
            difference: round_currency(self.difference),
        }
    }
}

pub fn compare_regimes(inputs: &TaxInputs) -> Result<RegimeComparison> {
    let old_regime = calculate_tax(&TaxInputs {
        regime: Regime::Old,
        ..*inputs
    })?;
    let new_regime = calculate_tax(&TaxInputs {
        regime: Regime::New,
        ..*inputs
    })?;

    let recommended = if old_regime.tax_after_deductions < new_regime.tax_after_deductions {
        Regime::Old
    } else {
        Regime::New
    };

    Ok(RegimeComparison {
        old_regime,
        new_regime,
        recommended,
        difference: (old_regime.tax_after_deductions - new_regime.tax_after_deductions).abs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_reference_old_regime() {
        let inputs = TaxInputs::new(1_200_000.0, Regime::Old)
            .with_deductions(150_000.0, 25_000.0, 50_000.0);
        let result = calculate_tax(&inputs).unwrap();

        assert_eq!(result.total_deductions, 225_000.0);
        assert_eq!(result.taxable_income, 975_000.0);
        assert_abs_diff_eq!(result.tax_before_deductions, 172_500.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.tax_after_deductions, 107_500.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.tax_savings, 65_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.effective_rate_percent, 8.958_333, epsilon = 1e-5);
        assert_abs_diff_eq!(result.take_home, 1_092_500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_new_regime_ignores_claims() {
        let inputs = TaxInputs::new(1_200_000.0, Regime::New)
            .with_deductions(150_000.0, 25_000.0, 50_000.0);
        let result = calculate_tax(&inputs).unwrap();

        assert_eq!(result.total_deductions, 0.0);
        assert_eq!(result.taxable_income, 1_200_000.0);
        assert_eq!(result.tax_savings, 0.0);
        assert_abs_diff_eq!(result.tax_after_deductions, 80_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_deductions_above_income() {
        let inputs = TaxInputs::new(100_000.0, Regime::Old)
            .with_deductions(150_000.0, 0.0, 0.0);
        let result = calculate_tax(&inputs).unwrap();
        assert_eq!(result.taxable_income, 0.0);
        assert_eq!(result.tax_after_deductions, 0.0);
    }

    #[test]
    fn test_negative_claims_are_rejected() {
        let inputs = TaxInputs::new(900_000.0, Regime::Old).with_deductions(-1.0, 0.0, 0.0);
        let err = calculate_tax(&inputs).unwrap_err();
        assert_eq!(err.field(), Some("section_80c"));

        let err = calculate_tax(&TaxInputs::new(0.0, Regime::New)).unwrap_err();
        assert_eq!(err.field(), Some("gross_income"));
    }

    #[test]
    fn test_compare_regimes() {
        let inputs = TaxInputs::new(1_200_000.0, Regime::Old)
            .with_deductions(150_000.0, 25_000.0, 50_000.0);
        let comparison = compare_regimes(&inputs).unwrap();

        assert_eq!(comparison.old_regime.regime, Regime::Old);
        assert_eq!(comparison.new_regime.regime, Regime::New);
        assert_eq!(comparison.recommended, Regime::New);
        assert_abs_diff_eq!(comparison.difference, 27_500.0, epsilon = 1e-6);
    }

    #[test]
    fn test_compare_regimes_tie_prefers_new() {
        let comparison = compare_regimes(&TaxInputs::new(200_000.0, Regime::Old)).unwrap();
        assert_eq!(comparison.difference, 0.0);
        assert_eq!(comparison.recommended, Regime::New);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_tax_is_monotonic_and_bounded(
            income in 0u32..10_000_000,
            raise in 0u32..1_000_000,
            old in any::<bool>(),
        ) {
            let regime = if old { Regime::Old } else { Regime::New };
            let low = income as f64;
            let high = low + raise as f64;

            let low_tax = tax_for_regime(low, regime);
            let high_tax = tax_for_regime(high, regime);
            prop_assert!(high_tax >= low_tax);
            prop_assert!(low_tax >= 0.0);
            prop_assert!(low_tax <= low);
            prop_assert!(high_tax <= high);
        }
    }
}
