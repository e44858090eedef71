//! Conversion from OpenDataSoft wire types to raw station records.
//!
//! This step only reshapes; it never rejects. Deciding which records are
//! usable is left to the station reduction pipeline.

use serde_json::Value;

use crate::stations::RawStationRecord;

use super::types::{RecordDto, SearchResponse};

/// Convert a whole response.
pub fn convert_response(response: SearchResponse) -> Vec<RawStationRecord> {
    response.records.into_iter().map(convert_record).collect()
}

/// Convert one record.
pub fn convert_record(record: RecordDto) -> RawStationRecord {
    let coordinates = record.geometry.map(|g| g.coordinates).unwrap_or_default();
    let fields = record.fields;

    let name = non_empty_text(fields.ad_station.as_ref())
        .or_else(|| non_empty_text(fields.n_station.as_ref()));

    RawStationRecord {
        longitude: coordinates.first().and_then(Value::as_f64),
        latitude: coordinates.get(1).and_then(Value::as_f64),
        distance: fields.dist,
        name,
        power: fields.puiss_max,
        access_type: non_empty_text(fields.acces_recharge.as_ref()),
    }
}

fn non_empty_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
