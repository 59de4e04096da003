//! Loading feed payloads saved to disk.
//!
//! Fetching is left to whatever polls the upstream API; these helpers read
//! the JSON it saved.

use std::path::Path;

use tracing::info;

use crate::domain::{StationLookup, TrainRecord};

use super::convert::{parse_stale_json, parse_stations_json, parse_trains_json};
use super::error::FeedError;

/// Read and normalize a trains payload file.
pub fn load_trains(path: impl AsRef<Path>) -> Result<Vec<TrainRecord>, FeedError> {
    let json = read(path.as_ref())?;
    let trains = parse_trains_json(&json)?;
    info!(path = %path.as_ref().display(), trains = trains.len(), "loaded trains");
    Ok(trains)
}

/// Read and normalize a station metadata file.
pub fn load_stations(path: impl AsRef<Path>) -> Result<StationLookup, FeedError> {
    let json = read(path.as_ref())?;
    let lookup = parse_stations_json(&json)?;
    info!(path = %path.as_ref().display(), stations = lookup.len(), "loaded stations");
    Ok(lookup)
}

/// Read a staleness payload file. Unreadable content counts as fresh, but
/// a missing file is still an error.
pub fn load_stale(path: impl AsRef<Path>) -> Result<bool, FeedError> {
    let json = read(path.as_ref())?;
    Ok(parse_stale_json(&json))
}

fn read(path: &Path) -> Result<String, FeedError> {
    std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })
}
