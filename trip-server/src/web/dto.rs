//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_MAX_ROWS, Station};
use crate::planner::TripPlanResult;

/// Request to plan a trip.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Trip distance (km)
    pub distance_km: f64,

    /// Vehicle range on a full charge (km)
    pub usable_range_km: f64,

    /// Minutes spent at each recharge stop
    pub recharge_minutes_per_stop: f64,

    /// Safety margin; defaults to the server's configured reserve
    pub reserve_fraction: Option<f64>,

    /// Average speed; defaults to the server's configured speed
    pub average_speed_kmh: Option<f64>,
}

/// A planned trip.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    pub exploitable_range_km: f64,
    pub segments: u64,
    pub stop_count: u64,
    pub driving_hours: f64,
    pub charging_minutes_total: f64,
    pub total_hours: f64,
}

impl From<TripPlanResult> for PlanTripResponse {
    fn from(result: TripPlanResult) -> Self {
        Self {
            exploitable_range_km: result.exploitable_range_km,
            segments: result.segments,
            stop_count: result.stop_count,
            driving_hours: result.driving_hours,
            charging_minutes_total: result.charging_minutes_total,
            total_hours: result.total_hours,
        }
    }
}

/// Request for driving time only.
#[derive(Debug, Deserialize)]
pub struct DriveTimeRequest {
    /// Trip distance (km)
    pub distance_km: f64,
}

/// Driving time only, no charging.
#[derive(Debug, Serialize)]
pub struct DriveTimeResponse {
    /// Driving time in hours, rounded to 4 decimals
    pub drive_h: f64,
}

/// Query for nearby stations.
#[derive(Debug, Deserialize)]
pub struct NearbyStationsRequest {
    pub lat: f64,
    pub lon: f64,

    /// Search radius in metres
    pub radius_m: f64,

    /// Maximum rows to ask the source for
    #[serde(default = "default_max_rows")]
    pub max_rows: u32,
}

fn default_max_rows() -> u32 {
    DEFAULT_MAX_ROWS
}

/// A station in search results.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_m: f64,
    pub power_kw: Option<f64>,
    pub access_type: Option<String>,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            name: station.name.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            distance_m: station.distance_m,
            power_kw: station.power_kw,
            access_type: station.access_type.clone(),
        }
    }
}

/// Response for nearby station search.
#[derive(Debug, Serialize)]
pub struct NearbyStationsResponse {
    /// Number of stations returned
    pub count: usize,

    /// Stations, nearest first
    pub stations: Vec<StationResult>,
}

/// Query for a recharge estimate.
#[derive(Debug, Deserialize)]
pub struct RechargeEstimateRequest {
    /// Usable battery capacity from the vehicle catalog (kWh)
    pub usable_kwh: Option<f64>,
}

/// Recharge estimate for one stop.
#[derive(Debug, Serialize)]
pub struct RechargeEstimateResponse {
    pub recharge_minutes: u32,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
