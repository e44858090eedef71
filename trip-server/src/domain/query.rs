//! Nearby-station query parameters.

use std::hash::{Hash, Hasher};

use super::station::fold_zero;

/// Number of rows requested from the station source when the caller
/// does not say otherwise.
pub const DEFAULT_MAX_ROWS: u32 = 15;

/// Error returned when a station query is out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station query: {reason}")]
pub struct InvalidQuery {
    reason: &'static str,
}

impl InvalidQuery {
    /// Returns the reason the query was rejected.
    pub fn reason(&self) -> &'static str {
        self.reason
    }
}

/// A validated "stations near this point" query.
///
/// Equality and hashing compare the exact bit patterns of the coordinates
/// and radius (with `-0.0` folded into `0.0`), so the value can be used
/// directly as a cache key. Two queries only match if the caller passed
/// equal numbers; nothing is rounded here.
///
/// # Examples
///
/// ```
/// use trip_server::domain::StationQuery;
///
/// let q = StationQuery::new(45.56, 5.92, 1000.0, 15).unwrap();
/// assert_eq!(q.radius_m(), 1000.0);
///
/// // Latitude out of range
/// assert!(StationQuery::new(91.0, 5.92, 1000.0, 15).is_err());
///
/// // Zero rows makes no sense
/// assert!(StationQuery::new(45.56, 5.92, 1000.0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StationQuery {
    latitude: f64,
    longitude: f64,
    radius_m: f64,
    max_rows: u32,
}

impl StationQuery {
    /// Build a query, checking every parameter.
    ///
    /// Latitude must lie in [-90, 90], longitude in [-180, 180], the radius
    /// must be finite and non-negative, and at least one row must be asked for.
    pub fn new(
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        max_rows: u32,
    ) -> Result<Self, InvalidQuery> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidQuery {
                reason: "latitude must be between -90 and 90",
            });
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidQuery {
                reason: "longitude must be between -180 and 180",
            });
        }

        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(InvalidQuery {
                reason: "radius must be a finite, non-negative number of metres",
            });
        }

        if max_rows == 0 {
            return Err(InvalidQuery {
                reason: "max_rows must be at least 1",
            });
        }

        Ok(Self {
            latitude,
            longitude,
            radius_m,
            max_rows,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    pub fn max_rows(&self) -> u32 {
        self.max_rows
    }

    /// The `lat,lon,radius` triple in the form geo-filter APIs expect.
    pub fn geofilter(&self) -> String {
        format!("{},{},{}", self.latitude, self.longitude, self.radius_m)
    }

    fn key(&self) -> (u64, u64, u64, u32) {
        (
            fold_zero(self.latitude).to_bits(),
            fold_zero(self.longitude).to_bits(),
            fold_zero(self.radius_m).to_bits(),
            self.max_rows,
        )
    }
}

impl PartialEq for StationQuery {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

// Construction rejects NaN and signed zero is folded, so bitwise equality
// is a total equivalence.
impl Eq for StationQuery {}

impl Hash for StationQuery {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn valid_query() {
        let q = StationQuery::new(45.5646, 5.9178, 2500.0, 15).unwrap();
        assert_eq!(q.latitude(), 45.5646);
        assert_eq!(q.longitude(), 5.9178);
        assert_eq!(q.radius_m(), 2500.0);
        assert_eq!(q.max_rows(), 15);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(StationQuery::new(-90.5, 0.0, 100.0, 1).is_err());
        assert!(StationQuery::new(0.0, 180.5, 100.0, 1).is_err());
        assert!(StationQuery::new(f64::NAN, 0.0, 100.0, 1).is_err());
        assert!(StationQuery::new(0.0, f64::INFINITY, 100.0, 1).is_err());
    }

    #[test]
    fn rejects_bad_radius() {
        let err = StationQuery::new(0.0, 0.0, -1.0, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid station query: radius must be a finite, non-negative number of metres"
        );
        assert!(StationQuery::new(0.0, 0.0, f64::NAN, 1).is_err());
    }

    #[test]
    fn zero_radius_is_allowed() {
        assert!(StationQuery::new(0.0, 0.0, 0.0, 1).is_ok());
    }

    #[test]
    fn identical_parameters_are_equal_keys() {
        let a = StationQuery::new(45.0, 5.0, 1000.0, 15).unwrap();
        let b = StationQuery::new(45.0, 5.0, 1000.0, 15).unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn signed_zero_is_the_same_key() {
        let a = StationQuery::new(0.0, 5.0, 0.0, 15).unwrap();
        let b = StationQuery::new(-0.0, 5.0, -0.0, 15).unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn keys_are_not_rounded() {
        let a = StationQuery::new(45.0, 5.0, 1000.0, 15).unwrap();
        let b = StationQuery::new(45.000001, 5.0, 1000.0, 15).unwrap();
        let c = StationQuery::new(45.0, 5.0, 1000.0, 16).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn geofilter_format() {
        let q = StationQuery::new(45.5, 5.9, 1000.0, 15).unwrap();
        assert_eq!(q.geofilter(), "45.5,5.9,1000");
    }
}
