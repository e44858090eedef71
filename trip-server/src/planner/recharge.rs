//! Recharge time estimate from battery capacity.
//!
//! The vehicle catalog only gives us usable battery capacity, not a
//! charging curve, so a stop is estimated as a full charge at a fixed
//! fast-charger power.

use super::config::PlannerConfig;

/// Estimated minutes for one recharge stop.
///
/// Falls back to the configured default capacity when the catalog has no
/// value, or a value that is not a positive number.
pub fn estimate_recharge_minutes(usable_kwh: Option<f64>, config: &PlannerConfig) -> u32 {
    let kwh = usable_kwh
        .filter(|kwh| kwh.is_finite() && *kwh > 0.0)
        .unwrap_or(config.default_usable_kwh);

    let minutes = kwh / config.fast_charge_kw * 60.0;
    if minutes.is_finite() && minutes > 0.0 {
        minutes.floor() as u32
    } else {
        0
    }
}
