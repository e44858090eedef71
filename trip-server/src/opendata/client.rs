//! OpenDataSoft records API client.

use std::time::Duration;

use tracing::debug;

use crate::domain::StationQuery;
use crate::stations::{RawStationRecord, SourceError, StationRecordSource};

use super::convert::convert_response;
use super::types::SearchResponse;

/// Default base URL for the OpenDataSoft portal hosting the IRVE dataset.
pub const DEFAULT_BASE_URL: &str = "https://odre.opendatasoft.com";

/// Dataset of French public charging points.
pub const DEFAULT_DATASET: &str = "bornes-irve";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Path of the v1 records search endpoint.
const SEARCH_PATH: &str = "/api/records/1.0/search/";

/// Configuration for the OpenDataSoft client.
#[derive(Debug, Clone)]
pub struct OpenDataConfig {
    /// Base URL of the portal
    pub base_url: String,
    /// Dataset identifier
    pub dataset: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OpenDataConfig {
    /// Create a config pointing at the given portal.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Set a custom dataset.
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OpenDataConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Client for the OpenDataSoft records search API.
///
/// The timeout set here is the only bound on a station fetch; callers do
/// not add their own.
#[derive(Debug, Clone)]
pub struct OpenDataClient {
    http: reqwest::Client,
    search_url: String,
    dataset: String,
}

impl OpenDataClient {
    /// Create a new client.
    pub fn new(config: OpenDataConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            search_url: search_url(&config.base_url),
            dataset: config.dataset,
        })
    }

    /// Search for charging points around a point.
    pub async fn search(&self, query: &StationQuery) -> Result<SearchResponse, SourceError> {
        let rows = query.max_rows().to_string();
        let geofilter = query.geofilter();

        debug!(url = %self.search_url, %geofilter, %rows, "querying OpenDataSoft");

        let response = self
            .http
            .get(&self.search_url)
            .query(&[
                ("dataset", self.dataset.as_str()),
                ("geofilter.distance", geofilter.as_str()),
                ("rows", rows.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| SourceError::Json {
            message: e.to_string(),
        })
    }
}

impl StationRecordSource for OpenDataClient {
    async fn query(&self, query: &StationQuery) -> Result<Vec<RawStationRecord>, SourceError> {
        let response = self.search(query).await?;
        Ok(convert_response(response))
    }
}

/// Join the base URL and the search path without doubling the slash.
fn search_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH)
}
