//! Running state of a projection between periods

use crate::money::PERIODS_PER_YEAR;

/// State of an investment at a point in time during a projection
#[derive(Debug, Clone)]
pub struct GrowthState {
    /// Current period (1-indexed, 0 before the first period)
    pub period: u32,

    /// Year containing the current period (1-indexed)
    pub year: u32,

    /// Month within the current year (1-12)
    pub month_in_year: u32,

    /// Contribution posted in the current period
    pub contribution: f64,

    /// Investment value after the current period
    pub balance: f64,

    /// Periodic contributions posted so far
    pub contributed: f64,
}

impl GrowthState {
    /// State before the first period, holding a starting balance
    pub fn starting_with(balance: f64) -> Self {
        Self {
            period: 0,
            year: 1,
            month_in_year: 0,
            contribution: 0.0,
            balance,
            contributed: 0.0,
        }
    }

    /// Advance to the next period and set its contribution
    ///
    /// The base amount is stepped up once per completed year:
    /// `base·(1+step_up)^⌊(period−1)/12⌋`.
    pub fn advance_period(&mut self, base_contribution: f64, step_up_rate: f64) {
        self.period += 1;
        let completed_years = (self.period - 1) / PERIODS_PER_YEAR;
        self.year = completed_years + 1;
        self.month_in_year = (self.period - 1) % PERIODS_PER_YEAR + 1;
        self.contribution = base_contribution * (1.0 + step_up_rate).powi(completed_years as i32);
    }

    /// Post this period's contribution, then compound (annuity-due)
    pub fn accrue(&mut self, periodic_rate: f64) {
        self.balance = (self.balance + self.contribution) * (1.0 + periodic_rate);
        self.contributed += self.contribution;
    }

    /// Whether the current period closes a year
    pub fn is_year_end(&self) -> bool {
        self.month_in_year == PERIODS_PER_YEAR
    }
}
