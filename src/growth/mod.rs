//! Compounding projections for SIP and goal planning

mod plan;
mod state;
mod projector;
mod goal;

pub use plan::{ContributionPlan, GrowthProjection, GrowthSnapshot};
pub use state::GrowthState;
pub use projector::{project, project_from, required_contribution, required_monthly_contribution};
pub use goal::{plan_goal, GoalPlan, GoalResult};

pub(crate) use projector::accumulate;
