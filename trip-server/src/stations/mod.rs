//! Nearby charging station discovery.
//!
//! Raw records from a [`StationRecordSource`] are noisy: coordinates go
//! missing, distances arrive as strings (or not at all), the same charger
//! is reported twice, and the source's radius filter is loose. This module
//! turns them into a clean, nearest-first list and caches it per query.

mod discovery;
mod error;
mod reduce;
mod source;

pub use discovery::StationDiscovery;
pub use error::{SourceError, StationSearchError};
pub use reduce::{RecordRejection, Reduction, normalize, parse_distance, reduce};
pub use source::{RawStationRecord, StationRecordSource};
