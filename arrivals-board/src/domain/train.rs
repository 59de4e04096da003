//! Canonical train and station records.
//!
//! These are produced by the `feed` module after upstream field-name
//! variants have been coalesced. Timestamps are kept as the raw strings the
//! feed sent; the selector decides how to interpret them.

use std::collections::HashMap;

use serde::Serialize;

use super::{Coordinates, StationCode};

/// A named place with a station code, either of which may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub name: String,
    pub code: String,
}

impl Endpoint {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// One stop in a train's itinerary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationStop {
    /// Station code as the feed spelled it.
    pub code: String,

    /// Station name, when the feed embeds one.
    pub name: Option<String>,

    /// Free-text stop status ("Departed", "Station", "Enroute", ...).
    pub status: Option<String>,

    /// Timetabled arrival.
    pub scheduled_arrival: Option<String>,

    /// Actual or live estimated arrival.
    pub actual_arrival: Option<String>,

    /// Station position embedded in the stop record.
    pub position: Option<Coordinates>,
}

impl StationStop {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// Case-insensitive check of the stop status against keywords.
    ///
    /// Keywords are expected in lowercase.
    pub fn status_contains_any(&self, keywords: &[String]) -> bool {
        let status = self.status.as_deref().unwrap_or_default().to_lowercase();
        keywords.iter().any(|k| status.contains(k.as_str()))
    }
}

/// A train currently in service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainRecord {
    pub train_num: String,
    pub route_name: String,
    pub origin: Endpoint,
    pub destination: Endpoint,

    /// Last reported train position.
    pub position: Option<Coordinates>,

    /// Train-level status message from the feed.
    pub status_msg: Option<String>,

    /// Full itinerary in calling order.
    pub stops: Vec<StationStop>,
}

impl TrainRecord {
    /// First stop in the itinerary at the given station.
    pub fn stop_at(&self, station: &StationCode) -> Option<&StationStop> {
        self.stops.iter().find(|stop| station.matches(&stop.code))
    }
}

/// Canonical name and position of a station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationLocation {
    pub code: StationCode,
    pub name: Option<String>,
    pub position: Option<Coordinates>,
}

/// Station metadata keyed by code.
///
/// Used purely for enrichment: an empty lookup still lets arrivals be
/// computed, just without names or station coordinates.
#[derive(Debug, Clone, Default)]
pub struct StationLookup {
    stations: HashMap<StationCode, StationLocation>,
}

impl StationLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a station entry.
    pub fn insert(&mut self, location: StationLocation) {
        self.stations.insert(location.code.clone(), location);
    }

    pub fn get(&self, code: &StationCode) -> Option<&StationLocation> {
        self.stations.get(code)
    }

    /// Look up by a raw feed code; invalid codes simply miss.
    pub fn get_raw(&self, raw: &str) -> Option<&StationLocation> {
        StationCode::parse(raw).ok().and_then(|code| self.get(&code))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<StationLocation> for StationLookup {
    fn from_iter<I: IntoIterator<Item = StationLocation>>(iter: I) -> Self {
        let mut lookup = Self::new();
        for location in iter {
            lookup.insert(location);
        }
        lookup
    }
}
