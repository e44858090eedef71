//! OpenDataSoft records API wire types.
//!
//! Only the parts of the `bornes-irve` payload we read are modelled. Field
//! values whose type varies between records are kept as raw JSON and
//! interpreted later, so one odd record cannot fail the whole response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response from `/api/records/1.0/search/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total matching records on the server (may exceed `records.len()`).
    #[serde(default)]
    pub nhits: Option<u64>,

    /// Missing when the dataset has no match.
    #[serde(default)]
    pub records: Vec<RecordDto>,
}

/// A single charging point record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecordDto {
    #[serde(default)]
    pub recordid: Option<String>,

    #[serde(default)]
    pub fields: RecordFields,

    #[serde(default)]
    pub geometry: Option<GeometryDto>,
}

/// Dataset fields of a record.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RecordFields {
    /// Distance from the geofilter point, in metres. Usually a string.
    #[serde(default)]
    pub dist: Option<Value>,

    /// Station address.
    #[serde(default)]
    pub ad_station: Option<Value>,

    /// Station name, used when there is no address.
    #[serde(default)]
    pub n_station: Option<Value>,

    /// Maximum power in kW.
    #[serde(default)]
    pub puiss_max: Option<Value>,

    /// Access conditions.
    #[serde(default)]
    pub acces_recharge: Option<Value>,
}

/// GeoJSON point geometry. Coordinates are `[lon, lat]`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeometryDto {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub coordinates: Vec<Value>,
}
