//! Derived arrival events.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::time::{TimeSource, format_iso, serialize_iso};
use super::{Coordinates, Endpoint};

/// Human-facing status of an arrival.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusLabel {
    Delayed,
    Boarding,
    OnTime,
    Departed,
    /// Free text from the feed, kept verbatim.
    Upstream(String),
}

impl StatusLabel {
    pub fn as_str(&self) -> &str {
        match self {
            StatusLabel::Delayed => "Delayed",
            StatusLabel::Boarding => "Boarding",
            StatusLabel::OnTime => "On time",
            StatusLabel::Departed => "Departed",
            StatusLabel::Upstream(text) => text,
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StatusLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One upcoming arrival of a train at a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrivalEvent {
    /// Station code as the feed spelled it, trimmed and upper-cased. Not
    /// necessarily a valid [`StationCode`](super::StationCode).
    pub station_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,

    pub train_num: String,
    pub route_name: String,
    pub origin: Endpoint,
    pub destination: Endpoint,

    #[serde(serialize_with = "serialize_iso")]
    pub arrival_time: DateTime<Utc>,

    pub time_source: TimeSource,
    pub eta_minutes: u32,

    #[serde(rename = "statusMsg")]
    pub status: StatusLabel,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_location: Option<Coordinates>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_location: Option<Coordinates>,
}

impl ArrivalEvent {
    /// Arrival time as ISO-8601 UTC with milliseconds.
    pub fn arrival_time_iso(&self) -> String {
        format_iso(self.arrival_time)
    }

    /// Identity used when merging result lists.
    fn dedupe_key(&self) -> (String, String) {
        (self.train_num.clone(), self.arrival_time_iso())
    }
}

/// Drop repeated arrivals, keeping the first of each.
///
/// Two events are the same when both the train number and the ISO arrival
/// time match. Relative order of the survivors is preserved.
pub fn dedupe_events<I>(events: I) -> Vec<ArrivalEvent>
where
    I: IntoIterator<Item = ArrivalEvent>,
{
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|event| seen.insert(event.dedupe_key()))
        .collect()
}
