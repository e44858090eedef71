//! Station search error types.

use crate::domain::InvalidQuery;

/// Errors from a station record source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response payload
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Source could not serve the request for another reason
    #[error("source unavailable: {message}")]
    Unavailable { message: String },
}

/// Errors from nearby-station discovery.
#[derive(Debug, thiserror::Error)]
pub enum StationSearchError {
    /// Caller passed coordinates or a radius that make no sense
    #[error(transparent)]
    InvalidQuery(#[from] InvalidQuery),

    /// The record source failed; nothing was cached
    #[error("station search failed: {cause}")]
    Source {
        #[source]
        cause: SourceError,
    },
}

impl From<SourceError> for StationSearchError {
    fn from(cause: SourceError) -> Self {
        StationSearchError::Source { cause }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn error_display() {
        let err = SourceError::Api {
            status: 503,
            message: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "API error 503: Service Unavailable");

        let err = SourceError::Json {
            message: "expected value".into(),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        let err = StationSearchError::from(SourceError::Unavailable {
            message: "offline".into(),
        });
        assert_eq!(
            err.to_string(),
            "station search failed: source unavailable: offline"
        );
    }

    #[test]
    fn search_error_keeps_cause() {
        let err = StationSearchError::from(SourceError::Api {
            status: 500,
            message: "boom".into(),
        });

        let cause = err.source().unwrap();
        assert_eq!(cause.to_string(), "API error 500: boom");
    }
}
