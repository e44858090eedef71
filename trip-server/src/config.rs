//! Server configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;
use std::str::FromStr;

use crate::cache::CacheConfig;
use crate::opendata::OpenDataConfig;
use crate::planner::PlannerConfig;

/// Default listen address.
const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Everything needed to assemble the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address to listen on (`BIND_ADDR`).
    pub bind_addr: SocketAddr,

    /// Live station API settings (`STATION_SOURCE_URL`,
    /// `STATION_SOURCE_TIMEOUT_SECS`).
    pub opendata: OpenDataConfig,

    /// Serve station records from this file instead of the live API
    /// (`STATION_MOCK_FILE`).
    pub mock_file: Option<PathBuf>,

    /// Station cache settings (`STATION_CACHE_CAPACITY`).
    pub cache: CacheConfig,

    /// Planner settings (`RESERVE_FRACTION`, `AVERAGE_SPEED_KMH`).
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value. Unset variables take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PlannerConfig::default();
        let bind_addr = parse_or(&lookup, "BIND_ADDR", || DEFAULT_BIND_ADDR)?;

        let mut opendata = OpenDataConfig::default();
        if let Some(url) = lookup("STATION_SOURCE_URL") {
            opendata.base_url = url;
        }
        let default_timeout = opendata.timeout_secs;
        opendata.timeout_secs =
            parse_or(&lookup, "STATION_SOURCE_TIMEOUT_SECS", || default_timeout)?;

        let mock_file = lookup("STATION_MOCK_FILE")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        let capacity = parse_or(&lookup, "STATION_CACHE_CAPACITY", || {
            CacheConfig::default().max_capacity
        })?;

        let reserve_fraction =
            parse_or(&lookup, "RESERVE_FRACTION", || defaults.reserve_fraction)?;
        if !(0.0..1.0).contains(&reserve_fraction) {
            return Err(invalid(&lookup, "RESERVE_FRACTION"));
        }

        let average_speed_kmh =
            parse_or(&lookup, "AVERAGE_SPEED_KMH", || defaults.average_speed_kmh)?;
        if !average_speed_kmh.is_finite() || average_speed_kmh <= 0.0 {
            return Err(invalid(&lookup, "AVERAGE_SPEED_KMH"));
        }

        Ok(Self {
            bind_addr,
            opendata,
            mock_file,
            cache: CacheConfig::new(capacity),
            planner: PlannerConfig::new(reserve_fraction, average_speed_kmh),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            opendata: OpenDataConfig::default(),
            mock_file: None,
            cache: CacheConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

/// Parse `name` if set, otherwise use the default.
fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default()),
    }
}

fn invalid<F>(lookup: &F, name: &'static str) -> ConfigError
where
    F: Fn(&str) -> Option<String>,
{
    ConfigError::Invalid {
        name,
        value: lookup(name).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.opendata.base_url, "https://odre.opendatasoft.com");
        assert_eq!(config.opendata.timeout_secs, 5);
        assert_eq!(config.mock_file, None);
        assert_eq!(config.cache.max_capacity, 128);
        assert_eq!(config.planner.reserve_fraction, 0.2);
        assert_eq!(config.planner.average_speed_kmh, 100.0);
    }

    #[test]
    fn default_impl_matches_empty_environment() {
        let config = AppConfig::default();
        let from_env = config_from(&[]).unwrap();

        assert_eq!(config.bind_addr, from_env.bind_addr);
        assert_eq!(config.cache.max_capacity, from_env.cache.max_capacity);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("STATION_SOURCE_URL", "http://localhost:9000"),
            ("STATION_SOURCE_TIMEOUT_SECS", "2"),
            ("STATION_MOCK_FILE", "data/stations.json"),
            ("STATION_CACHE_CAPACITY", "16"),
            ("RESERVE_FRACTION", "0.1"),
            ("AVERAGE_SPEED_KMH", " 90 "),
        ])
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.opendata.base_url, "http://localhost:9000");
        assert_eq!(config.opendata.timeout_secs, 2);
        assert_eq!(config.mock_file, Some(PathBuf::from("data/stations.json")));
        assert_eq!(config.cache.max_capacity, 16);
        assert_eq!(config.planner.reserve_fraction, 0.1);
        assert_eq!(config.planner.average_speed_kmh, 90.0);
    }

    #[test]
    fn empty_mock_file_is_ignored() {
        let config = config_from(&[("STATION_MOCK_FILE", "")]).unwrap();
        assert_eq!(config.mock_file, None);
    }

    #[test]
    fn rejects_unparseable_values() {
        let err = config_from(&[("STATION_CACHE_CAPACITY", "lots")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "STATION_CACHE_CAPACITY",
                value: "lots".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid value for STATION_CACHE_CAPACITY: \"lots\""
        );
    }

    #[test]
    fn rejects_out_of_range_reserve() {
        assert!(config_from(&[("RESERVE_FRACTION", "1")]).is_err());
        assert!(config_from(&[("RESERVE_FRACTION", "-0.5")]).is_err());
    }

    #[test]
    fn rejects_non_positive_speed() {
        assert!(config_from(&[("AVERAGE_SPEED_KMH", "0")]).is_err());
    }
}
