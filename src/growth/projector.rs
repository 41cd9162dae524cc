//! Forward and goal-seeking projections for recurring contributions

use log::debug;

use super::plan::{ContributionPlan, GrowthProjection, GrowthSnapshot};
use super::state::GrowthState;
use crate::annuity::{annuity_factor, future_value_lump_sum};
use crate::error::{ProjectionError, Result};
use crate::money::{self, ensure_finite};
use crate::validation;

/// Project a contribution plan with no starting balance
pub fn project(plan: &ContributionPlan) -> Result<GrowthProjection> {
    project_from(plan, 0.0)
}

/// Project a contribution plan on top of an existing balance
///
/// Each month the (stepped-up) contribution is posted and the balance then
/// compounds at the monthly rate. One snapshot is emitted per completed year.
pub fn project_from(plan: &ContributionPlan, starting_balance: f64) -> Result<GrowthProjection> {
    plan.validate()?;
    validation::non_negative("starting_balance", starting_balance)?;
    accumulate(plan, starting_balance)
}

/// Forward projection without input validation
///
/// Used by the goal and retirement planners, where a required contribution
/// of zero is a legitimate outcome.
pub(crate) fn accumulate(plan: &ContributionPlan, starting_balance: f64) -> Result<GrowthProjection> {
    let rate = plan.monthly_rate();
    let step_up = plan.step_up_rate();
    let total_months = plan.total_months();

    let mut state = GrowthState::starting_with(starting_balance);
    let mut snapshots = Vec::with_capacity(plan.horizon_years as usize);

    for _period in 1..=total_months {
        state.advance_period(plan.periodic_amount, step_up);
        state.accrue(rate);

        if state.is_year_end() {
            snapshots.push(GrowthSnapshot {
                year: state.year,
                accumulated_value: state.balance,
                cumulative_contributed: state.contributed,
            });
        }
    }

    let maturity_value = ensure_finite("maturity_value", state.balance)?;
    let total_contributed = ensure_finite("total_contributed", state.contributed)?;

    debug!(
        "projected {} months: maturity {:.2}, contributed {:.2}",
        total_months, maturity_value, total_contributed
    );

    Ok(GrowthProjection {
        snapshots,
        maturity_value,
        total_contributed,
        estimated_returns: maturity_value - total_contributed - starting_balance,
        final_contribution: state.contribution,
    })
}

/// Level contribution per period needed to reach `target`
///
/// The starting balance is compounded forward first; only the remaining
/// shortfall is funded by contributions, via the annuity-due factor. A goal
/// already covered by the starting balance needs no contribution.
pub fn required_contribution(
    target: f64,
    starting_balance: f64,
    periodic_rate: f64,
    periods: u32,
) -> Result<f64> {
    if periods == 0 {
        return Err(ProjectionError::domain(
            "required_contribution",
            "periods must be at least 1",
        ));
    }

    let grown_balance = future_value_lump_sum(starting_balance, periodic_rate, periods);
    let shortfall = target - grown_balance;
    if shortfall <= 0.0 {
        debug!(
            "target {:.2} already met by starting balance growing to {:.2}",
            target, grown_balance
        );
        return Ok(0.0);
    }

    let contribution = shortfall / annuity_factor(periodic_rate, periods);
    ensure_finite("required_contribution", contribution)
}

/// Convenience wrapper taking an annual percentage and whole years
pub fn required_monthly_contribution(
    target: f64,
    starting_balance: f64,
    annual_rate_percent: f64,
    years: u32,
) -> Result<f64> {
    required_contribution(
        target,
        starting_balance,
        money::monthly_rate(annual_rate_percent),
        money::months_in(years),
    )
}
