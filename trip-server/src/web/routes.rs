//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::planner::{PlanError, TripPlanInput, driving_hours, estimate_recharge_minutes, plan};
use crate::stations::StationSearchError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/trip/plan", post(plan_trip))
        .route("/api/trip/drive-time", post(drive_time))
        .route("/api/stations/nearby", get(nearby_stations))
        .route("/api/vehicles/recharge-estimate", get(recharge_estimate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "invalid JSON body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Unwrap query parameters, turning a rejection into a JSON error.
fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    match query {
        Ok(Query(params)) => Ok(params),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "invalid query string");
            Err(AppError::BadRequest {
                message: rejection.body_text(),
            })
        }
    }
}

/// Plan a trip: driving time, charging stops and total time.
async fn plan_trip(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PlanTripResponse>, AppError> {
    let req: PlanTripRequest = parse_body(&body)?;

    let mut input = TripPlanInput::new(
        req.distance_km,
        req.usable_range_km,
        req.recharge_minutes_per_stop,
        &state.planner,
    );
    if let Some(reserve) = req.reserve_fraction {
        input = input.with_reserve_fraction(reserve);
    }
    if let Some(speed) = req.average_speed_kmh {
        input = input.with_average_speed(speed);
    }

    let result = plan(&input)?;

    Ok(Json(result.into()))
}

/// Driving time only, at the configured average speed.
async fn drive_time(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DriveTimeResponse>, AppError> {
    let req: DriveTimeRequest = parse_body(&body)?;

    let hours = driving_hours(req.distance_km, state.planner.average_speed_kmh)?;

    Ok(Json(DriveTimeResponse {
        drive_h: (hours * 10_000.0).round() / 10_000.0,
    }))
}

/// Charging stations near a point, nearest first.
async fn nearby_stations(
    State(state): State<AppState>,
    query: Result<Query<NearbyStationsRequest>, QueryRejection>,
) -> Result<Json<NearbyStationsResponse>, AppError> {
    let req = parse_query(query)?;
    let stations = state
        .stations
        .find_nearby(req.lat, req.lon, req.radius_m, req.max_rows)
        .await?;

    let stations: Vec<StationResult> = stations.iter().map(StationResult::from).collect();

    Ok(Json(NearbyStationsResponse {
        count: stations.len(),
        stations,
    }))
}

/// Estimated minutes for one recharge stop.
async fn recharge_estimate(
    State(state): State<AppState>,
    query: Result<Query<RechargeEstimateRequest>, QueryRejection>,
) -> Result<Json<RechargeEstimateResponse>, AppError> {
    let req = parse_query(query)?;

    Ok(Json(RechargeEstimateResponse {
        recharge_minutes: estimate_recharge_minutes(req.usable_kwh, &state.planner),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    BadGateway { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StationSearchError> for AppError {
    fn from(e: StationSearchError) -> Self {
        match e {
            StationSearchError::InvalidQuery(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            StationSearchError::Source { .. } => AppError::BadGateway {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::BadGateway { message } => (StatusCode::BAD_GATEWAY, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
