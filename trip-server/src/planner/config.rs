//! Planner configuration.

/// Fraction of range held back as a safety margin.
pub const DEFAULT_RESERVE_FRACTION: f64 = 0.2;

/// Average cruising speed used to turn distance into driving time.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 100.0;

/// Fast-charger power assumed when estimating recharge time.
pub const DEFAULT_FAST_CHARGE_KW: f64 = 150.0;

/// Usable battery capacity assumed when the vehicle catalog has none.
pub const DEFAULT_USABLE_KWH: f64 = 50.0;

/// Tunable parameters for trip planning.
///
/// This is the single place the reserve fraction default lives; anything
/// that shows it to a user should read it from here.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Fraction of usable range kept unused, in [0, 1).
    pub reserve_fraction: f64,

    /// Average speed over the whole trip (km/h).
    pub average_speed_kmh: f64,

    /// Charger power for recharge estimates (kW).
    pub fast_charge_kw: f64,

    /// Fallback usable battery capacity (kWh).
    pub default_usable_kwh: f64,
}

impl PlannerConfig {
    /// Create a configuration with the given reserve and speed, keeping the
    /// default recharge estimate parameters.
    pub fn new(reserve_fraction: f64, average_speed_kmh: f64) -> Self {
        Self {
            reserve_fraction,
            average_speed_kmh,
            ..Self::default()
        }
    }

    /// Set the charger power used for recharge estimates.
    pub fn with_fast_charge_kw(mut self, kw: f64) -> Self {
        self.fast_charge_kw = kw;
        self
    }

    /// Set the fallback battery capacity.
    pub fn with_default_usable_kwh(mut self, kwh: f64) -> Self {
        self.default_usable_kwh = kwh;
        self
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            reserve_fraction: DEFAULT_RESERVE_FRACTION,
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            fast_charge_kw: DEFAULT_FAST_CHARGE_KW,
            default_usable_kwh: DEFAULT_USABLE_KWH,
        }
    }
}
