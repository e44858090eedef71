//! Nearby-station discovery.
//!
//! Wraps a [`StationRecordSource`] with the proximity cache and the
//! reduction pipeline. A cache hit returns the stored result as-is; a miss
//! makes exactly one source call, reduces the records and caches the
//! result, even when it is empty.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::{CacheConfig, ProximityCache, StationEntry};
use crate::domain::StationQuery;

use super::error::StationSearchError;
use super::reduce::reduce;
use super::source::StationRecordSource;

/// Station discovery over a record source, with caching.
pub struct StationDiscovery<S> {
    source: S,
    cache: ProximityCache,
}

impl<S: StationRecordSource> StationDiscovery<S> {
    /// Create a new discovery pipeline.
    pub fn new(source: S, cache_config: &CacheConfig) -> Self {
        Self {
            source,
            cache: ProximityCache::new(cache_config),
        }
    }

    /// Find stations within `radius_m` metres of a point, nearest first.
    ///
    /// Fails with [`StationSearchError::InvalidQuery`] before any I/O if the
    /// parameters are out of range.
    pub async fn find_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: f64,
        max_rows: u32,
    ) -> Result<StationEntry, StationSearchError> {
        let query = StationQuery::new(latitude, longitude, radius_m, max_rows)?;
        self.find(&query).await
    }

    /// Find stations for an already-validated query.
    pub async fn find(&self, query: &StationQuery) -> Result<StationEntry, StationSearchError> {
        if let Some(cached) = self.cache.get(query).await {
            debug!(
                lat = query.latitude(),
                lon = query.longitude(),
                radius_m = query.radius_m(),
                "station cache hit"
            );
            return Ok(cached);
        }

        let records = self.source.query(query).await.map_err(|cause| {
            warn!(error = %cause, geofilter = %query.geofilter(), "station source failed");
            StationSearchError::from(cause)
        })?;

        let received = records.len();
        let reduction = reduce(records, query.radius_m());

        info!(
            geofilter = %query.geofilter(),
            received,
            kept = reduction.stations.len(),
            dropped = reduction.dropped,
            "fetched nearby stations"
        );

        let entry = Arc::new(reduction.stations);
        self.cache.insert(*query, entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Access the cache (for monitoring and tests).
    pub fn cache(&self) -> &ProximityCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opendata::MockStationSource;
    use crate::stations::RawStationRecord;
    use serde_json::json;

    fn record(lat: f64, lon: f64, dist: &str) -> RawStationRecord {
        RawStationRecord {
            latitude: Some(lat),
            longitude: Some(lon),
            distance: Some(json!(dist)),
            name: Some(format!("Borne {dist}")),
            ..Default::default()
        }
    }

    fn discovery(records: Vec<RawStationRecord>) -> StationDiscovery<MockStationSource> {
        StationDiscovery::new(
            MockStationSource::from_records(records),
            &CacheConfig::default(),
        )
    }

    #[tokio::test]
    async fn filters_and_orders_by_distance() {
        let discovery = discovery(vec![
            record(45.1, 5.1, "500"),
            record(45.2, 5.2, "1200"),
            record(45.3, 5.3, "900"),
        ]);

        let stations = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();
        let distances: Vec<f64> = stations.iter().map(|s| s.distance_m).collect();

        assert_eq!(distances, vec![500.0, 900.0]);
    }

    #[tokio::test]
    async fn repeat_query_hits_cache() {
        let discovery = discovery(vec![record(45.1, 5.1, "500")]);

        let first = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();
        let second = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(discovery.source().call_count(), 1);
    }

    #[tokio::test]
    async fn negative_zero_hits_cache() {
        let discovery = discovery(vec![record(0.001, 5.0, "100")]);

        let first = discovery.find_nearby(0.0, 5.0, 1000.0, 15).await.unwrap();
        let second = discovery.find_nearby(-0.0, 5.0, 1000.0, 15).await.unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(discovery.source().call_count(), 1);
    }

    #[tokio::test]
    async fn different_query_misses_cache() {
        let discovery = discovery(vec![record(45.1, 5.1, "500")]);

        discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();
        discovery.find_nearby(45.0, 5.0, 2000.0, 15).await.unwrap();
        discovery.find_nearby(45.0, 5.0, 1000.0, 10).await.unwrap();

        assert_eq!(discovery.source().call_count(), 3);
    }

    #[tokio::test]
    async fn malformed_records_do_not_fail_query() {
        let discovery = discovery(vec![
            RawStationRecord {
                latitude: None,
                ..record(0.0, 5.0, "100")
            },
            record(45.2, 5.2, "not a number"),
            record(45.3, 5.3, "300"),
        ]);

        let stations = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();

        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "Borne 300");
    }

    #[tokio::test]
    async fn duplicates_are_removed() {
        let discovery = discovery(vec![
            record(45.1, 5.1, "500"),
            record(45.1, 5.1, "400"),
            record(45.3, 5.3, "900"),
        ]);

        let stations = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].distance_m, 500.0);
    }

    #[tokio::test]
    async fn empty_result_is_cached() {
        let discovery = discovery(Vec::new());

        let first = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();
        let second = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await.unwrap();

        assert!(first.is_empty());
        assert!(second.is_empty());
        assert_eq!(discovery.source().call_count(), 1);
    }

    #[tokio::test]
    async fn source_failure_is_not_cached() {
        let source = MockStationSource::failing("upstream timed out");
        let discovery = StationDiscovery::new(source, &CacheConfig::default());

        let first = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await;
        let second = discovery.find_nearby(45.0, 5.0, 1000.0, 15).await;

        assert!(matches!(first, Err(StationSearchError::Source { .. })));
        assert!(matches!(second, Err(StationSearchError::Source { .. })));
        assert_eq!(discovery.source().call_count(), 2);

        let query = StationQuery::new(45.0, 5.0, 1000.0, 15).unwrap();
        assert!(discovery.cache().get(&query).await.is_none());
    }

    #[tokio::test]
    async fn invalid_query_skips_source() {
        let discovery = discovery(vec![record(45.1, 5.1, "500")]);

        let result = discovery.find_nearby(123.0, 5.0, 1000.0, 15).await;

        assert!(matches!(result, Err(StationSearchError::InvalidQuery(_))));
        assert_eq!(discovery.source().call_count(), 0);
    }

    #[tokio::test]
    async fn concurrent_identical_queries_agree() {
        let discovery = Arc::new(discovery(vec![
            record(45.1, 5.1, "500"),
            record(45.3, 5.3, "900"),
        ]));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let discovery = discovery.clone();
                tokio::spawn(async move { discovery.find_nearby(45.0, 5.0, 1000.0, 15).await })
            })
            .collect();

        for handle in handles {
            let stations = handle.await.unwrap().unwrap();
            assert_eq!(stations.len(), 2);
        }

        // Duplicate fetches are allowed, but never more than one per caller.
        let calls = discovery.source().call_count();
        assert!((1..=8).contains(&calls));
    }
}
