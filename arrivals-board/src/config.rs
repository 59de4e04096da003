//! Runtime configuration read from the environment.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

use crate::domain::{InvalidStationCode, StationCode, parse_timestamp};
use crate::selector::SelectorConfig;

/// Path to the saved in-service trains payload (required).
pub const ENV_TRAINS_FILE: &str = "ARRIVALS_TRAINS_FILE";
/// Path to the saved station metadata payload.
pub const ENV_STATIONS_FILE: &str = "ARRIVALS_STATIONS_FILE";
/// Path to the saved staleness payload.
pub const ENV_STALE_FILE: &str = "ARRIVALS_STALE_FILE";
/// Station to build a board for.
pub const ENV_STATION: &str = "ARRIVALS_STATION";
/// Train number to follow; takes precedence over the station.
pub const ENV_TRAIN: &str = "ARRIVALS_TRAIN";
/// Evaluation time override.
pub const ENV_NOW: &str = "ARRIVALS_NOW";
pub const ENV_STATION_GRACE_MINS: &str = "ARRIVALS_STATION_GRACE_MINS";
pub const ENV_TRAIN_GRACE_MINS: &str = "ARRIVALS_TRAIN_GRACE_MINS";
pub const ENV_DELAY_THRESHOLD_MINS: &str = "ARRIVALS_DELAY_THRESHOLD_MINS";

/// Station shown when none is configured.
pub const DEFAULT_STATION: &str = "FLG";

/// Errors from reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} must be set")]
    Missing(&'static str),

    /// The station variable is not a valid code
    #[error("ARRIVALS_STATION: {0}")]
    InvalidStation(#[from] InvalidStationCode),

    /// A numeric override did not parse
    #[error("{key}: expected a whole number of minutes, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    /// The evaluation time override did not parse
    #[error("ARRIVALS_NOW: invalid timestamp {0:?}")]
    InvalidTimestamp(String),
}

/// What to select arrivals for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// All trains calling at one station.
    Station(StationCode),
    /// One train's remaining itinerary, by train number.
    Train(String),
}

/// Everything one run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub trains_file: PathBuf,
    pub stations_file: Option<PathBuf>,
    pub stale_file: Option<PathBuf>,
    pub query: Query,

    /// Fixed evaluation time; the wall clock is used when absent.
    pub now: Option<DateTime<Utc>>,

    pub selector: SelectorConfig,
}

impl RunConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let trains_file = get(ENV_TRAINS_FILE)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(ENV_TRAINS_FILE))?;

        let query = match get(ENV_TRAIN) {
            Some(train_num) => Query::Train(train_num),
            None => {
                let station = get(ENV_STATION).unwrap_or_else(|| DEFAULT_STATION.to_string());
                Query::Station(StationCode::parse(&station)?)
            }
        };

        let now = match get(ENV_NOW) {
            Some(raw) => Some(parse_timestamp(&raw).ok_or(ConfigError::InvalidTimestamp(raw))?),
            None => None,
        };

        let mut selector = SelectorConfig::default();
        if let Some(mins) = minutes(&get, ENV_STATION_GRACE_MINS)? {
            selector.station_grace_mins = mins;
        }
        if let Some(mins) = minutes(&get, ENV_TRAIN_GRACE_MINS)? {
            selector.train_grace_mins = mins;
        }
        if let Some(mins) = minutes(&get, ENV_DELAY_THRESHOLD_MINS)? {
            selector.delay_threshold_mins = mins;
        }

        Ok(Self {
            trains_file,
            stations_file: get(ENV_STATIONS_FILE).map(PathBuf::from),
            stale_file: get(ENV_STALE_FILE).map(PathBuf::from),
            query,
            now,
            selector,
        })
    }

    /// The configured evaluation time, or the current wall-clock time.
    pub fn resolve_now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

fn minutes(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<i64>, ConfigError> {
    match get(key) {
        Some(value) => match value.parse::<u32>() {
            Ok(mins) => Ok(Some(i64::from(mins))),
            Err(_) => Err(ConfigError::InvalidNumber { key, value }),
        },
        None => Ok(None),
    }
}
