//! Web layer for the EV trip planner.
//!
//! A thin JSON API over the planner and station discovery.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
