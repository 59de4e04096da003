//! Conversion from feed DTOs to canonical domain records.
//!
//! This is the only place that knows about upstream payload shapes and
//! field-name variants. The selector only ever sees `TrainRecord`s.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    Coordinates, Endpoint, StationCode, StationLocation, StationLookup, StationStop, TrainRecord,
};

use super::error::FeedError;
use super::types::{RawPosition, RawScalar, RawStation, RawStop, RawTrain};

/// Normalize a trains payload into canonical records.
///
/// Accepted shapes, checked in order:
/// - `{ "trains": [ ... ] }`
/// - an object whose array-valued members hold trains, e.g.
///   `{ "3": [ ... ], "4": [ ... ] }`
/// - a bare array of trains
///
/// Anything else yields an empty list. Non-object items and objects that
/// fail to deserialize are skipped.
pub fn normalize_trains_payload(payload: &Value) -> Vec<TrainRecord> {
    let items: Vec<&Value> = match payload {
        Value::Object(map) => match map.get("trains") {
            Some(Value::Array(trains)) => trains.iter().collect(),
            _ => map
                .values()
                .filter_map(Value::as_array)
                .flatten()
                .collect(),
        },
        Value::Array(trains) => trains.iter().collect(),
        _ => Vec::new(),
    };

    let trains: Vec<TrainRecord> = items
        .into_iter()
        .filter(|item| item.is_object())
        .filter_map(|item| match RawTrain::deserialize(item) {
            Ok(raw) => Some(convert_train(raw)),
            Err(e) => {
                warn!("skipping malformed train: {e}");
                None
            }
        })
        .collect();

    debug!(trains = trains.len(), "normalized trains payload");
    trains
}

/// Normalize a station metadata payload into a lookup.
///
/// Accepted shapes:
/// - `{ "stations": [ ... ] }`
/// - an object keyed by station code, e.g. `{ "FLG": { ... } }`
/// - a bare array of stations
///
/// When an entry has no `code` of its own, the map key is used. Entries
/// without a valid code are skipped.
pub fn normalize_stations_payload(payload: &Value) -> StationLookup {
    let entries: Vec<(Option<&str>, &Value)> = match payload {
        Value::Object(map) => match map.get("stations") {
            Some(Value::Array(stations)) => stations.iter().map(|s| (None, s)).collect(),
            _ => map.iter().map(|(k, v)| (Some(k.as_str()), v)).collect(),
        },
        Value::Array(stations) => stations.iter().map(|s| (None, s)).collect(),
        _ => Vec::new(),
    };

    let lookup: StationLookup = entries
        .into_iter()
        .filter(|(_, item)| item.is_object())
        .filter_map(|(key, item)| match RawStation::deserialize(item) {
            Ok(raw) => convert_station(raw, key),
            Err(e) => {
                warn!("skipping malformed station: {e}");
                None
            }
        })
        .collect();

    debug!(stations = lookup.len(), "normalized stations payload");
    lookup
}

/// Read the feed's staleness flag.
///
/// Only `{"stale": true}` (or a truthy equivalent) counts as stale; any
/// other shape is treated as fresh.
pub fn parse_stale_flag(payload: &Value) -> bool {
    match payload.get("stale") {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Parse and normalize a trains payload from JSON text.
pub fn parse_trains_json(json: &str) -> Result<Vec<TrainRecord>, FeedError> {
    let payload: Value = serde_json::from_str(json)?;
    Ok(normalize_trains_payload(&payload))
}

/// Parse and normalize a station metadata payload from JSON text.
pub fn parse_stations_json(json: &str) -> Result<StationLookup, FeedError> {
    let payload: Value = serde_json::from_str(json)?;
    Ok(normalize_stations_payload(&payload))
}

/// Parse a staleness payload from JSON text; malformed input counts as fresh.
pub fn parse_stale_json(json: &str) -> bool {
    match serde_json::from_str::<Value>(json) {
        Ok(payload) => parse_stale_flag(&payload),
        Err(e) => {
            warn!("ignoring malformed stale payload: {e}");
            false
        }
    }
}

fn convert_train(raw: RawTrain) -> TrainRecord {
    let stops = match raw.stations {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|item| item.is_object())
            .filter_map(|item| match RawStop::deserialize(item) {
                Ok(stop) => Some(convert_stop(stop)),
                Err(e) => {
                    warn!("skipping malformed stop: {e}");
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    TrainRecord {
        train_num: first_text(&[&raw.train_num, &raw.train_id]).unwrap_or_default(),
        route_name: first_text(&[&raw.route_name, &raw.route]).unwrap_or_default(),
        origin: Endpoint::new(
            first_text(&[&raw.orig_name, &raw.origin]).unwrap_or_default(),
            first_text(&[&raw.orig_code, &raw.origin_code]).unwrap_or_default(),
        ),
        destination: Endpoint::new(
            first_text(&[&raw.dest_name, &raw.destination]).unwrap_or_default(),
            first_text(&[&raw.dest_code, &raw.destination_code]).unwrap_or_default(),
        ),
        position: convert_position(&raw.position),
        status_msg: first_text(&[&raw.status_msg]),
        stops,
    }
}

fn convert_stop(raw: RawStop) -> StationStop {
    StationStop {
        code: first_text(&[&raw.code]).unwrap_or_default(),
        name: first_text(&[&raw.name]),
        status: first_text(&[&raw.status]),
        scheduled_arrival: first_text(&[&raw.sch_arr]),
        actual_arrival: first_text(&[&raw.arr]),
        position: convert_position(&raw.position),
    }
}

fn convert_station(raw: RawStation, key: Option<&str>) -> Option<StationLocation> {
    let code_text = first_text(&[&raw.code]).or_else(|| key.map(str::to_string))?;
    let code = match StationCode::parse(&code_text) {
        Ok(code) => code,
        Err(e) => {
            debug!("skipping station {code_text:?}: {e}");
            return None;
        }
    };

    Some(StationLocation {
        code,
        name: first_text(&[&raw.name, &raw.station_name]),
        position: convert_position(&raw.position),
    })
}

/// First field that is present and non-empty, as text.
fn first_text(fields: &[&Option<RawScalar>]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| field.as_ref())
        .map(RawScalar::to_text)
        .find(|text| !text.is_empty())
}

/// Coordinates from the first present spelling of each component.
fn convert_position(raw: &RawPosition) -> Option<Coordinates> {
    let lat = [&raw.lat, &raw.latitude, &raw.latit]
        .into_iter()
        .find_map(|field| field.as_ref());
    let lon = [&raw.lon, &raw.lng, &raw.long, &raw.longitude]
        .into_iter()
        .find_map(|field| field.as_ref());

    Coordinates::from_parts(lat?.to_f64(), lon?.to_f64())
}
