//! Application state for the web layer.

use std::sync::Arc;

use crate::opendata::OpenDataSource;
use crate::planner::PlannerConfig;
use crate::stations::StationDiscovery;

/// Shared application state.
///
/// Built once in the composition root and handed to the router; there is
/// no process-wide client or cache.
#[derive(Clone)]
pub struct AppState {
    /// Cached nearby-station discovery
    pub stations: Arc<StationDiscovery<OpenDataSource>>,

    /// Trip planner configuration
    pub planner: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(stations: StationDiscovery<OpenDataSource>, planner: PlannerConfig) -> Self {
        Self {
            stations: Arc::new(stations),
            planner: Arc::new(planner),
        }
    }
}
