//! Rent-vs-buy comparison over a common horizon
//!
//! The buy path pays the down payment up front and then the loan EMI until
//! the loan is repaid. The rent path pays a monthly rent that rises once a
//! year. Both cumulative cost series are indexed by the same years.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::amortization::{amortize, AmortizationSchedule, LoanTerms};
use crate::error::{ProjectionError, Result};
use crate::money::{self, ensure_finite, round_currency, PERIODS_PER_YEAR};
use crate::validation;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyInputs {
    pub home_price: f64,
    pub down_payment: f64,
    pub loan_rate_percent: f64,
    pub loan_tenure_years: u32,
    pub monthly_rent: f64,
    #[serde(default)]
    pub annual_rent_increase_percent: f64,
    pub horizon_years: u32,
}

impl RentVsBuyInputs {
    pub fn validate(&self) -> Result<()> {
        validation::positive("home_price", self.home_price)?;
        validation::non_negative("down_payment", self.down_payment)?;
        if self.down_payment > self.home_price {
            return Err(ProjectionError::validation(
                "down_payment",
                "must not exceed home_price",
            ));
        }
        validation::non_negative("loan_rate_percent", self.loan_rate_percent)?;
        validation::positive_years("loan_tenure_years", self.loan_tenure_years)?;
        validation::positive("monthly_rent", self.monthly_rent)?;
        validation::non_negative(
            "annual_rent_increase_percent",
            self.annual_rent_increase_percent,
        )?;
        validation::positive_years("horizon_years", self.horizon_years)?;
        Ok(())
    }

    pub fn loan_amount(&self) -> f64 {
        self.home_price - self.down_payment
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Rent,
    Buy,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Rent => write!(f, "rent"),
            Recommendation::Buy => write!(f, "buy"),
        }
    }
}

/// Cumulative cost of each path at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyPoint {
    pub year: u32,
    pub cumulative_buy_cost: f64,
    pub cumulative_rent_cost: f64,
}

impl RentVsBuyPoint {
    pub fn rounded(&self) -> Self {
        Self {
            year: self.year,
            cumulative_buy_cost: round_currency(self.cumulative_buy_cost),
            cumulative_rent_cost: round_currency(self.cumulative_rent_cost),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentVsBuyResult {
    pub loan_amount: f64,

    /// Zero when the home is bought outright
    pub monthly_emi: f64,

    pub points: Vec<RentVsBuyPoint>,
    pub total_buy_cost: f64,
    pub total_rent_cost: f64,
    pub recommendation: Recommendation,

    /// `|total_buy_cost − total_rent_cost|`
    pub savings: f64,
}

impl RentVsBuyResult {
    pub fn rounded(&self) -> Self {
        Self {
            loan_amount: round_currency(self.loan_amount),
            monthly_emi: round_currency(self.monthly_emi),
            points: self.points.iter().map(RentVsBuyPoint::rounded).collect(),
            total_buy_cost: round_currency(self.total_buy_cost),
            total_rent_cost: round_currency(self.total_rent_cost),
            recommendation: self.recommendation,
            savings: round_currency(self.savings),
        }
    }
}

pub fn compare(inputs: &RentVsBuyInputs) -> Result<RentVsBuyResult> {
    inputs.validate()?;

    let loan_amount = inputs.loan_amount();
    let schedule: Option<AmortizationSchedule> = if loan_amount > 0.0 {
        Some(amortize(&LoanTerms::new(
            loan_amount,
            inputs.loan_rate_percent,
            inputs.loan_tenure_years,
        ))?)
    } else {
        None
    };

    let rent_growth = 1.0 + money::percent_to_rate(inputs.annual_rent_increase_percent);
    let mut current_rent = inputs.monthly_rent;
    let mut cumulative_rent = 0.0;
    let mut points = Vec::with_capacity(inputs.horizon_years as usize);

    for year in 1..=inputs.horizon_years {
        let paid_to_date = schedule
            .as_ref()
            .map(|s| s.payments_through_period(money::months_in(year)))
            .unwrap_or(0.0);

        cumulative_rent += current_rent * PERIODS_PER_YEAR as f64;
        current_rent *= rent_growth;

        points.push(RentVsBuyPoint {
            year,
            cumulative_buy_cost: inputs.down_payment + paid_to_date,
            cumulative_rent_cost: cumulative_rent,
        });
    }

    let (total_buy_cost, total_rent_cost) = points
        .last()
        .map(|p| (p.cumulative_buy_cost, p.cumulative_rent_cost))
        .unwrap_or((inputs.down_payment, 0.0));
    ensure_finite("total_buy_cost", total_buy_cost)?;
    ensure_finite("total_rent_cost", total_rent_cost)?;

    let recommendation = if total_rent_cost < total_buy_cost {
        Recommendation::Rent
    } else {
        Recommendation::Buy
    };

    debug!(
        "after {} years: buy {:.2}, rent {:.2} -> {}",
        inputs.horizon_years, total_buy_cost, total_rent_cost, recommendation
    );

    Ok(RentVsBuyResult {
        loan_amount,
        monthly_emi: schedule.as_ref().map(|s| s.monthly_payment).unwrap_or(0.0),
        points,
        total_buy_cost,
        total_rent_cost,
        recommendation,
        savings: (total_buy_cost - total_rent_cost).abs(),
    })
}
