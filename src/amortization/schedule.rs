//! Amortization output structures

use serde::{Deserialize, Serialize};

use crate::money::{round_currency, PERIODS_PER_YEAR};

/// A single row of the schedule for one monthly installment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Installment number (1-indexed)
    pub period: u32,

    /// Interest charged on the opening balance
    pub interest_paid: f64,

    /// Reduction in balance achieved by this installment
    pub principal_paid: f64,

    /// Balance after the installment, never negative
    pub remaining_balance: f64,
}

impl AmortizationEntry {
    pub fn rounded(&self) -> Self {
        Self {
            period: self.period,
            interest_paid: round_currency(self.interest_paid),
            principal_paid: round_currency(self.principal_paid),
            remaining_balance: round_currency(self.remaining_balance),
        }
    }
}

/// Entries aggregated over one year of installments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyAmortization {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub closing_balance: f64,
}

/// Principal vs. interest split of the total amount repaid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanComposition {
    pub principal: f64,
    pub interest: f64,
}

/// Complete amortization result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Amount borrowed
    pub principal: f64,

    /// Level monthly installment (EMI)
    pub monthly_payment: f64,

    /// Installments actually run; below the nominal count on early payoff
    pub periods_run: u32,

    /// `monthly_payment × periods_run`
    pub total_paid: f64,

    /// `total_paid − principal`
    pub total_interest: f64,

    /// Monthly rows in period order
    pub entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    pub fn new(principal: f64, monthly_payment: f64) -> Self {
        Self {
            principal,
            monthly_payment,
            periods_run: 0,
            total_paid: 0.0,
            total_interest: 0.0,
            entries: Vec::new(),
        }
    }

    /// Append an entry and refresh the running totals
    pub fn add_entry(&mut self, entry: AmortizationEntry) {
        self.entries.push(entry);
        self.periods_run = self.entries.len() as u32;
        self.total_paid = self.monthly_payment * self.periods_run as f64;
        self.total_interest = self.total_paid - self.principal;
    }

    /// Balance after the last installment
    pub fn final_balance(&self) -> f64 {
        self.entries
            .last()
            .map(|e| e.remaining_balance)
            .unwrap_or(self.principal)
    }

    pub fn composition(&self) -> LoanComposition {
        LoanComposition {
            principal: self.principal,
            interest: self.total_interest,
        }
    }

    /// Cumulative installments paid through `period` (inclusive)
    pub fn payments_through_period(&self, period: u32) -> f64 {
        self.monthly_payment * period.min(self.periods_run) as f64
    }

    /// Aggregate entries per year; the final year may be partial
    pub fn yearly(&self) -> Vec<YearlyAmortization> {
        self.entries
            .chunks(PERIODS_PER_YEAR as usize)
            .enumerate()
            .map(|(idx, block)| YearlyAmortization {
                year: idx as u32 + 1,
                principal_paid: block.iter().map(|e| e.principal_paid).sum(),
                interest_paid: block.iter().map(|e| e.interest_paid).sum(),
                closing_balance: block.last().map(|e| e.remaining_balance).unwrap_or(0.0),
            })
            .collect()
    }

    /// Copy with every currency amount rounded to 2 decimal places
    pub fn rounded(&self) -> Self {
        Self {
            principal: round_currency(self.principal),
            monthly_payment: round_currency(self.monthly_payment),
            periods_run: self.periods_run,
            total_paid: round_currency(self.total_paid),
            total_interest: round_currency(self.total_interest),
            entries: self.entries.iter().map(AmortizationEntry::rounded).collect(),
        }
    }
}

impl YearlyAmortization {
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            principal_paid: round_currency(self.principal_paid),
            interest_paid: round_currency(self.interest_paid),
            closing_balance: round_currency(self.closing_balance),
        }
    }
}
