//! Trip segmentation.
//!
//! Splits a trip into range-limited legs and turns the number of legs
//! into recharge stops and total time. The usable range is first reduced
//! by the reserve fraction, so the planner never schedules a leg that
//! would drain the battery to empty.

use super::config::PlannerConfig;

/// Error from trip planning. Both variants are caller input problems.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanError {
    /// Usable range is zero, negative or not a number
    #[error("invalid range: usable range must be a positive number of km, got {0}")]
    InvalidRange(f64),

    /// Any other parameter is out of bounds
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Parameters for one trip estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlanInput {
    /// Total distance to cover (km).
    pub distance_km: f64,

    /// Range on a full charge, before any safety margin (km).
    pub usable_range_km: f64,

    /// Time spent at each recharge stop (minutes).
    pub recharge_minutes_per_stop: f64,

    /// Fraction of range held back, in [0, 1).
    pub reserve_fraction: f64,

    /// Average speed (km/h).
    pub average_speed_kmh: f64,
}

impl TripPlanInput {
    /// Create an input, taking reserve and speed from the config.
    pub fn new(
        distance_km: f64,
        usable_range_km: f64,
        recharge_minutes_per_stop: f64,
        config: &PlannerConfig,
    ) -> Self {
        Self {
            distance_km,
            usable_range_km,
            recharge_minutes_per_stop,
            reserve_fraction: config.reserve_fraction,
            average_speed_kmh: config.average_speed_kmh,
        }
    }

    /// Override the reserve fraction.
    pub fn with_reserve_fraction(mut self, reserve_fraction: f64) -> Self {
        self.reserve_fraction = reserve_fraction;
        self
    }

    /// Override the average speed.
    pub fn with_average_speed(mut self, average_speed_kmh: f64) -> Self {
        self.average_speed_kmh = average_speed_kmh;
        self
    }

    /// Validate every parameter.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.usable_range_km.is_finite() || self.usable_range_km <= 0.0 {
            return Err(PlanError::InvalidRange(self.usable_range_km));
        }

        if !self.distance_km.is_finite() || self.distance_km < 0.0 {
            return Err(PlanError::InvalidInput(
                "distance must be a finite, non-negative number of km",
            ));
        }

        if !(0.0..1.0).contains(&self.reserve_fraction) {
            return Err(PlanError::InvalidInput(
                "reserve fraction must be at least 0 and below 1",
            ));
        }

        if !self.recharge_minutes_per_stop.is_finite() || self.recharge_minutes_per_stop < 0.0 {
            return Err(PlanError::InvalidInput(
                "recharge time must be a finite, non-negative number of minutes",
            ));
        }

        validate_speed(self.average_speed_kmh)
    }
}

/// Structured trip estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct TripPlanResult {
    /// Range actually planned between stops (km).
    pub exploitable_range_km: f64,

    /// Number of range-limited legs.
    pub segments: u64,

    /// Time behind the wheel (hours).
    pub driving_hours: f64,

    /// Recharge stops needed; one fewer than the number of legs.
    pub stop_count: u64,

    /// Time spent charging across all stops (minutes).
    pub charging_minutes_total: f64,

    /// Driving plus charging (hours).
    pub total_hours: f64,
}

/// Relative slack absorbed before rounding the leg count up.
const LEG_TOLERANCE: f64 = 1e-9;

/// Plan a trip.
///
/// # Examples
///
/// ```
/// use trip_server::planner::{PlannerConfig, TripPlanInput, plan};
///
/// let input = TripPlanInput::new(350.0, 150.0, 30.0, &PlannerConfig::default());
/// let result = plan(&input).unwrap();
///
/// // 150 km range with a 20% reserve leaves 120 km per leg: 3 legs, 2 stops.
/// assert_eq!(result.segments, 3);
/// assert_eq!(result.stop_count, 2);
/// assert_eq!(result.charging_minutes_total, 60.0);
/// ```
pub fn plan(input: &TripPlanInput) -> Result<TripPlanResult, PlanError> {
    input.validate()?;

    let exploitable_range_km = input.usable_range_km * (1.0 - input.reserve_fraction);

    // A partial leg still needs its own charge, so round up. The ratio is
    // nudged down first so that a trip of exactly N legs stays at N when
    // the range product picks up rounding error (350 * 0.7 != 245).
    let segments = if input.distance_km == 0.0 {
        0
    } else {
        let legs = input.distance_km / exploitable_range_km;
        ((legs - LEG_TOLERANCE).ceil() as u64).max(1)
    };
    let stop_count = segments.saturating_sub(1);

    let driving_hours = input.distance_km / input.average_speed_kmh;
    let charging_minutes_total = stop_count as f64 * input.recharge_minutes_per_stop;
    let total_hours = driving_hours + charging_minutes_total / 60.0;

    Ok(TripPlanResult {
        exploitable_range_km,
        segments,
        driving_hours,
        stop_count,
        charging_minutes_total,
        total_hours,
    })
}

/// Driving time alone, without any charging.
pub fn driving_hours(distance_km: f64, average_speed_kmh: f64) -> Result<f64, PlanError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(PlanError::InvalidInput(
            "distance must be a finite, non-negative number of km",
        ));
    }
    validate_speed(average_speed_kmh)?;

    Ok(distance_km / average_speed_kmh)
}

fn validate_speed(average_speed_kmh: f64) -> Result<(), PlanError> {
    if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
        return Err(PlanError::InvalidInput(
            "average speed must be a positive number of km/h",
        ));
    }
    Ok(())
}
