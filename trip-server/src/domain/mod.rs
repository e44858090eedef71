//! Domain types for the EV trip planner.
//!
//! Values here are validated at construction time, so code that receives
//! them can trust their invariants.

mod query;
mod station;

pub use query::{DEFAULT_MAX_ROWS, InvalidQuery, StationQuery};
pub use station::Station;
