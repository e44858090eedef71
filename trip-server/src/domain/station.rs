//! Normalized charging station.

/// A charging station that survived normalization.
///
/// Coordinates are finite and the distance is a finite, non-negative
/// number of metres from the query point. The name may be empty when the
/// source gave nothing usable.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Free-text identifier (usually the street address of the site).
    pub name: String,

    pub latitude: f64,

    pub longitude: f64,

    /// Distance from the query point, in metres.
    pub distance_m: f64,

    /// Maximum charging power, in kW.
    pub power_kw: Option<f64>,

    /// Access tag as reported by the source (e.g. "Accès libre").
    pub access_type: Option<String>,
}

impl Station {
    /// Key used to spot duplicates: the exact coordinate pair.
    ///
    /// Positive and negative zero are folded together so that the key
    /// agrees with `==` on the coordinates.
    pub fn coordinate_key(&self) -> (u64, u64) {
        (fold_zero(self.latitude).to_bits(), fold_zero(self.longitude).to_bits())
    }
}

/// Map `-0.0` to `0.0` so equal coordinates share one bit pattern.
pub(crate) fn fold_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
