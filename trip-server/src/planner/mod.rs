//! EV trip planner.
//!
//! Turns a distance, a vehicle range and a per-stop recharge time into an
//! estimate of how many charging stops a trip needs and how long it takes.
//! Everything here is plain arithmetic with no shared state, so it can be
//! called from any thread without synchronization.

mod config;
mod recharge;
mod trip;

pub use config::{
    DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_FAST_CHARGE_KW, DEFAULT_RESERVE_FRACTION,
    DEFAULT_USABLE_KWH, PlannerConfig,
};
pub use recharge::estimate_recharge_minutes;
pub use trip::{PlanError, TripPlanInput, TripPlanResult, driving_hours, plan};
