//! Station board snapshots.
//!
//! A snapshot is what one refresh of a station display shows: the next
//! arrival, a short list of upcoming ones, and freshness metadata. Snapshots
//! are rebuilt from scratch on every poll.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ArrivalEvent, StationCode, dedupe_events, serialize_iso};

/// Maximum number of upcoming arrivals on a board.
pub const UPCOMING_LIMIT: usize = 8;

/// Tag identifying where board data came from.
pub const DATA_SOURCE: &str = "amtraker_v3_unofficial";

/// One refresh of a station board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardSnapshot {
    pub station_code: StationCode,

    #[serde(serialize_with = "serialize_iso")]
    pub now_utc: DateTime<Utc>,

    /// Earliest upcoming arrival, if any.
    pub next_train: Option<ArrivalEvent>,

    /// Up to [`UPCOMING_LIMIT`] arrivals in time order.
    pub upcoming_trains: Vec<ArrivalEvent>,

    /// Rows for a single combined display: the next train followed by the
    /// upcoming list, each arrival shown once.
    pub display_trains: Vec<ArrivalEvent>,

    #[serde(serialize_with = "serialize_iso")]
    pub last_updated_utc: DateTime<Utc>,

    pub data_source: &'static str,

    /// Whether the upstream tracker reported its data as stale.
    pub stale: bool,
}

impl BoardSnapshot {
    /// Build a snapshot from arrivals already sorted by time.
    pub fn build(
        station_code: StationCode,
        now: DateTime<Utc>,
        arrivals: Vec<ArrivalEvent>,
        stale: bool,
    ) -> Self {
        let mut upcoming_trains = arrivals;
        upcoming_trains.truncate(UPCOMING_LIMIT);
        let next_train = upcoming_trains.first().cloned();
        let display_trains =
            dedupe_events(next_train.iter().chain(upcoming_trains.iter()).cloned());

        Self {
            station_code,
            now_utc: now,
            next_train,
            upcoming_trains,
            display_trains,
            last_updated_utc: now,
            data_source: DATA_SOURCE,
            stale,
        }
    }
}
