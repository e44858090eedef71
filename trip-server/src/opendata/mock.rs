//! Mock station source for development and tests.
//!
//! Serves a fixed set of records, either given directly or loaded from a
//! JSON file in the OpenDataSoft response format, as if they were a live
//! response.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::StationQuery;
use crate::stations::{RawStationRecord, SourceError, StationRecordSource};

use super::convert::convert_response;
use super::types::SearchResponse;

/// Mock source that ignores location and returns the same records every
/// time, truncated to the requested row count.
#[derive(Debug, Clone)]
pub struct MockStationSource {
    records: Arc<Vec<RawStationRecord>>,
    /// When set, every query fails with this message.
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockStationSource {
    /// Serve the given records.
    pub fn from_records(records: Vec<RawStationRecord>) -> Self {
        Self {
            records: Arc::new(records),
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load records from a saved OpenDataSoft response.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();

        let json = std::fs::read_to_string(path).map_err(|e| SourceError::Unavailable {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let response: SearchResponse =
            serde_json::from_str(&json).map_err(|e| SourceError::Json {
                message: format!("failed to parse {}: {}", path.display(), e),
            })?;

        Ok(Self::from_records(convert_response(response)))
    }

    /// A source whose every query fails.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::from_records(Vec::new())
        }
    }

    /// Number of queries served (or failed) so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of records this source holds.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this source holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl StationRecordSource for MockStationSource {
    async fn query(&self, query: &StationQuery) -> Result<Vec<RawStationRecord>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(SourceError::Unavailable {
                message: message.clone(),
            });
        }

        let rows = usize::try_from(query.max_rows()).unwrap_or(usize::MAX);
        Ok(self.records.iter().take(rows).cloned().collect())
    }
}
