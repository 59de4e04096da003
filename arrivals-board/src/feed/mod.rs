//! Upstream train feed ingestion.
//!
//! Turns the JSON payloads of an Amtraker-style train tracker into
//! canonical domain records:
//! - the in-service trains payload, either `{"trains": [...]}` or an object
//!   of arrays keyed by train number
//! - the optional station metadata payload (code to name and coordinates)
//! - the optional staleness flag (`{"stale": true}`)
//!
//! Upstream field-name drift is absorbed here so selection logic never sees
//! it.

mod convert;
mod error;
mod load;
mod types;

pub use convert::{
    normalize_stations_payload, normalize_trains_payload, parse_stale_flag, parse_stale_json,
    parse_stations_json, parse_trains_json,
};
pub use error::FeedError;
pub use load::{load_stale, load_stations, load_trains};
pub use types::{RawPosition, RawScalar, RawStation, RawStop, RawTrain};
