//! Domain types for the arrivals board.
//!
//! Canonical train records (after feed normalization), validated station
//! codes, timestamp helpers and the derived `ArrivalEvent`. Types that carry
//! an invariant enforce it at construction time.

mod arrival;
mod coords;
mod station;
mod time;
mod train;

pub use arrival::{ArrivalEvent, StatusLabel, dedupe_events};
pub use coords::Coordinates;
pub use station::{InvalidStationCode, StationCode};
pub use time::{
    ResolvedTime, TimeSource, choose_arrival_time, eta_minutes, format_iso, has_explicit_offset,
    parse_timestamp, serialize_iso,
};
pub use train::{Endpoint, StationLocation, StationLookup, StationStop, TrainRecord};
