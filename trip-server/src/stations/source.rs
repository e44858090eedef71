//! The station record source seam.

use std::future::Future;

use serde_json::Value;

use crate::domain::StationQuery;

use super::error::SourceError;

/// One raw report of a charging point, as the source gave it.
///
/// Nothing here is trusted: coordinates may be missing, the distance may
/// be a number, a numeric string, or garbage, and the source's own radius
/// filter may have let far-away records through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawStationRecord {
    pub longitude: Option<f64>,

    pub latitude: Option<f64>,

    /// Reported distance from the query point, in metres.
    pub distance: Option<Value>,

    pub name: Option<String>,

    /// Maximum power rating, in kW.
    pub power: Option<Value>,

    pub access_type: Option<String>,
}

/// Trait for fetching raw station records near a point.
///
/// This is the only I/O boundary of station discovery. Timeouts and
/// retries, if any, are the implementation's business.
pub trait StationRecordSource: Send + Sync {
    /// Fetch up to `query.max_rows()` records within `query.radius_m()` of
    /// the query point.
    fn query(
        &self,
        query: &StationQuery,
    ) -> impl Future<Output = Result<Vec<RawStationRecord>, SourceError>> + Send;
}
