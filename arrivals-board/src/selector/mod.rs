//! Arrival selection.
//!
//! Given a snapshot of in-service trains and a single evaluation time,
//! derives the ordered list of upcoming arrivals either at one station
//! (station-scoped) or along one train's itinerary (train-scoped). Both
//! modes share timestamp resolution and status derivation.
//!
//! Selection never fails: stops with missing or unparseable data are
//! skipped and optional attributes are omitted.

mod config;
mod select;
mod status;


use chrono::{DateTime, Utc};

pub use config::{SelectorConfig, StatusKeywords};
pub use select::ArrivalSelector;
pub use status::{StatusInputs, classify_stop_status, derive_status};

use crate::domain::{ArrivalEvent, StationCode, StationLookup, TrainRecord};

/// Station-scoped selection with the default configuration.
pub fn select_for_station(
    trains: &[TrainRecord],
    station: &StationCode,
    now: DateTime<Utc>,
    lookup: Option<&StationLookup>,
) -> Vec<ArrivalEvent> {
    ArrivalSelector::default().select_for_station(trains, station, now, lookup)
}

/// Train-scoped selection with the default configuration.
pub fn select_for_train(
    train: &TrainRecord,
    now: DateTime<Utc>,
    lookup: &StationLookup,
) -> Vec<ArrivalEvent> {
    ArrivalSelector::default().select_for_train(train, now, lookup)
}

/// Find a train by its number, ignoring surrounding whitespace.
pub fn find_train<'a>(trains: &'a [TrainRecord], train_num: &str) -> Option<&'a TrainRecord> {
    let wanted = train_num.trim();
    trains.iter().find(|train| train.train_num.trim() == wanted)
}
