//! Raw record reduction: normalize, filter, deduplicate, sort.
//!
//! Bad records are dropped one at a time and never fail the whole batch.
//! Every drop carries a [`RecordRejection`] so it shows up in the logs.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::domain::Station;

use super::source::RawStationRecord;

/// Why a raw record did not make it into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRejection {
    /// Latitude or longitude absent or not finite
    MissingCoordinates,
    /// No distance reported
    MissingDistance,
    /// Distance present but not a finite, non-negative number
    MalformedDistance,
    /// Distance beyond the requested radius
    OutsideRadius,
    /// Same coordinates as an earlier record
    Duplicate,
}

impl fmt::Display for RecordRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RecordRejection::MissingCoordinates => "missing coordinates",
            RecordRejection::MissingDistance => "missing distance",
            RecordRejection::MalformedDistance => "malformed distance",
            RecordRejection::OutsideRadius => "outside radius",
            RecordRejection::Duplicate => "duplicate coordinates",
        };
        f.write_str(reason)
    }
}

/// Outcome of reducing one batch of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reduction {
    /// Surviving stations, nearest first.
    pub stations: Vec<Station>,

    /// Number of records dropped, for any reason.
    pub dropped: usize,
}

/// Parse a reported distance.
///
/// Accepts JSON numbers and numeric strings (surrounding whitespace is
/// ignored). Anything else, including negative or non-finite values, is
/// malformed.
pub fn parse_distance(value: &Value) -> Result<f64, RecordRejection> {
    let distance = match value {
        Value::Number(n) => n.as_f64().ok_or(RecordRejection::MalformedDistance)?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| RecordRejection::MalformedDistance)?,
        Value::Null => return Err(RecordRejection::MissingDistance),
        _ => return Err(RecordRejection::MalformedDistance),
    };

    if distance.is_finite() && distance >= 0.0 {
        Ok(distance)
    } else {
        Err(RecordRejection::MalformedDistance)
    }
}

/// Parse an optional power rating. Unusable values become `None` rather
/// than rejecting the record.
fn parse_power(value: Option<&Value>) -> Option<f64> {
    let power = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    (power.is_finite() && power >= 0.0).then_some(power)
}

/// Turn one raw record into a station.
pub fn normalize(record: RawStationRecord) -> Result<Station, RecordRejection> {
    let (Some(latitude), Some(longitude)) = (record.latitude, record.longitude) else {
        return Err(RecordRejection::MissingCoordinates);
    };
    if !latitude.is_finite() || !longitude.is_finite() {
        return Err(RecordRejection::MissingCoordinates);
    }

    let distance_m = parse_distance(
        record
            .distance
            .as_ref()
            .ok_or(RecordRejection::MissingDistance)?,
    )?;

    Ok(Station {
        name: record.name.unwrap_or_default(),
        latitude,
        longitude,
        distance_m,
        power_kw: parse_power(record.power.as_ref()),
        access_type: record.access_type,
    })
}

/// Reduce a batch of raw records to the stations within `radius_m`.
///
/// Records are normalized, re-checked against the radius (the source's
/// own filter is not trusted), deduplicated on exact coordinates with the
/// first occurrence winning, then stably sorted by distance so ties keep
/// their input order.
pub fn reduce(records: Vec<RawStationRecord>, radius_m: f64) -> Reduction {
    let mut seen = HashSet::new();
    let mut stations = Vec::with_capacity(records.len());
    let mut dropped = 0;

    for (index, record) in records.into_iter().enumerate() {
        let kept = normalize(record).and_then(|station| {
            if station.distance_m > radius_m {
                Err(RecordRejection::OutsideRadius)
            } else if !seen.insert(station.coordinate_key()) {
                Err(RecordRejection::Duplicate)
            } else {
                Ok(station)
            }
        });

        match kept {
            Ok(station) => stations.push(station),
            Err(reason) => {
                debug!(index, %reason, "dropped station record");
                dropped += 1;
            }
        }
    }

    stations.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

    Reduction { stations, dropped }
}
