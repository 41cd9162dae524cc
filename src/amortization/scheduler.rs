//! Declining-balance scheduler for level-payment loans

use log::{debug, warn};

use super::schedule::{AmortizationEntry, AmortizationSchedule};
use super::terms::LoanTerms;
use crate::annuity::fixed_payment;
use crate::error::Result;
use crate::money::{ensure_finite, RATE_EPSILON};

/// Balances at or below this are treated as fully repaid
pub const BALANCE_EPSILON: f64 = 1e-9;

/// Build the month-by-month schedule for a loan
///
/// The EMI is computed once; each installment pays the month's interest and
/// retires the rest of the balance. The schedule stops without padding the
/// first time the balance reaches zero, so rounding can produce fewer rows
/// than the nominal tenure.
pub fn amortize(terms: &LoanTerms) -> Result<AmortizationSchedule> {
    terms.validate()?;

    let rate = terms.monthly_rate();
    let total_months = terms.total_months();
    let payment = ensure_finite(
        "monthly_payment",
        fixed_payment(terms.principal, rate, total_months)?,
    )?;

    if rate.abs() < RATE_EPSILON {
        debug!("zero-rate loan: installment is principal / {}", total_months);
    }

    let mut schedule = AmortizationSchedule::new(terms.principal, payment);
    let mut balance = terms.principal;

    for period in 1..=total_months {
        let interest = balance * rate;
        let principal_portion = payment - interest;

        let mut next_balance = (balance - principal_portion).max(0.0);
        if next_balance <= BALANCE_EPSILON {
            next_balance = 0.0;
        }

        schedule.add_entry(AmortizationEntry {
            period,
            interest_paid: interest,
            principal_paid: balance - next_balance,
            remaining_balance: next_balance,
        });
        balance = next_balance;

        if balance == 0.0 {
            if period < total_months {
                warn!(
                    "loan repaid after {} of {} installments",
                    period, total_months
                );
            }
            break;
        }
    }

    ensure_finite("total_paid", schedule.total_paid)?;
    ensure_finite("total_interest", schedule.total_interest)?;

    debug!(
        "amortized {:.2} over {} installments of {:.2}",
        terms.principal, schedule.periods_run, payment
    );

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProjectionError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use proptest::prelude::*;

    #[test]
    fn test_reference_loan() {
        let schedule = amortize(&LoanTerms::new(1_000_000.0, 10.0, 5)).unwrap();

        assert_abs_diff_eq!(schedule.monthly_payment, 21_247.04, epsilon = 0.01);
        assert_abs_diff_eq!(schedule.total_interest, 274_822.0, epsilon = 1.0);
        assert_eq!(schedule.periods_run, 60);
        assert_abs_diff_eq!(schedule.final_balance(), 0.0, epsilon = 0.01);

        let first = schedule.entries[0];
        assert_eq!(first.period, 1);
        assert_abs_diff_eq!(first.interest_paid, 8_333.33, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_loan() {
        let schedule = amortize(&LoanTerms::new(120_000.0, 0.0, 2)).unwrap();

        assert_relative_eq!(schedule.monthly_payment, 5_000.0);
        assert_abs_diff_eq!(schedule.total_interest, 0.0, epsilon = 1e-6);
        assert!(schedule.entries.iter().all(|e| e.interest_paid == 0.0));
        assert_eq!(schedule.entries.last().unwrap().remaining_balance, 0.0);
    }

    #[test]
    fn test_invalid_terms_are_rejected() {
        let err = amortize(&LoanTerms::new(-5.0, 8.0, 10)).unwrap_err();
        assert!(matches!(err, ProjectionError::Validation { field: "principal", .. }));
    }

    #[test]
    fn test_oversized_tenure_is_rejected() {
        let err = amortize(&LoanTerms::new(1_000_000.0, 10.0, 400_000_000)).unwrap_err();
        assert!(matches!(err, ProjectionError::Validation { field: "tenure_years", .. }));
    }

    #[test]
    fn test_enormous_rate_is_not_finite() {
        let err = amortize(&LoanTerms::new(1_000_000.0, 1e300, 5)).unwrap_err();
        assert!(matches!(err, ProjectionError::NonFinite { field: "monthly_payment" }));
    }

    #[test]
    fn test_interest_identity() {
        let schedule = amortize(&LoanTerms::new(6_400_000.0, 8.0, 20)).unwrap();
        let interest: f64 = schedule.entries.iter().map(|e| e.interest_paid).sum();
        assert_abs_diff_eq!(interest, schedule.total_interest, epsilon = 0.01);
        assert_abs_diff_eq!(
            schedule.total_interest,
            schedule.total_paid - schedule.principal,
            epsilon = 1e-6
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_principal_is_fully_repaid(
            principal in 1_000u32..50_000_000,
            rate_bp in 0u32..2_400,
            tenure in 1u32..31,
        ) {
            let terms = LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, tenure);
            let schedule = amortize(&terms).unwrap();

            let repaid: f64 = schedule.entries.iter().map(|e| e.principal_paid).sum();
            prop_assert!((repaid - terms.principal).abs() < 0.01);
            prop_assert!(schedule.periods_run <= terms.total_months());
            prop_assert!(
                (schedule.total_interest - (schedule.total_paid - terms.principal)).abs() < 1e-6
            );
        }

        #[test]
        fn prop_balance_is_non_increasing_and_non_negative(
            principal in 1_000u32..10_000_000,
            rate_bp in 0u32..3_000,
            tenure in 1u32..31,
        ) {
            let terms = LoanTerms::new(principal as f64, rate_bp as f64 / 100.0, tenure);
            let schedule = amortize(&terms).unwrap();

            let mut previous = terms.principal;
            for entry in &schedule.entries {
                prop_assert!(entry.remaining_balance >= 0.0);
                prop_assert!(entry.remaining_balance <= previous);
                previous = entry.remaining_balance;
            }
        }
    }
}
