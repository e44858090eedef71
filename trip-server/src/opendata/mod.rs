//! OpenDataSoft charging point source.
//!
//! Implements [`StationRecordSource`] over the OpenDataSoft records API
//! (the French `bornes-irve` dataset by default), plus a mock that serves
//! saved responses for running without network access.
//!
//! Key characteristics of the API:
//! - `geofilter.distance=lat,lon,radius` selects records around a point
//! - The distance field `dist` is usually a string, and sometimes missing
//! - Geometry coordinates are `[lon, lat]`
//! - The radius filter is loose; records slightly outside it do appear

mod client;
mod convert;
mod mock;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_DATASET, OpenDataClient, OpenDataConfig};
pub use convert::{convert_record, convert_response};
pub use mock::MockStationSource;
pub use types::{GeometryDto, RecordDto, RecordFields, SearchResponse};

use crate::domain::StationQuery;
use crate::stations::{RawStationRecord, SourceError, StationRecordSource};

/// The source picked at startup: the live API or a mock file.
#[derive(Debug, Clone)]
pub enum OpenDataSource {
    Live(OpenDataClient),
    Mock(MockStationSource),
}

impl StationRecordSource for OpenDataSource {
    async fn query(&self, query: &StationQuery) -> Result<Vec<RawStationRecord>, SourceError> {
        match self {
            OpenDataSource::Live(client) => client.query(query).await,
            OpenDataSource::Mock(mock) => mock.query(query).await,
        }
    }
}
