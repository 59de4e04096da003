//! One end-to-end run: load payloads, select arrivals, render JSON.

use tracing::{info, warn};

use crate::board::BoardSnapshot;
use crate::config::{ConfigError, Query, RunConfig};
use crate::domain::StationLookup;
use crate::feed::{FeedError, load_stale, load_stations, load_trains};
use crate::selector::{ArrivalSelector, find_train};

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("failed to encode output: {0}")]
    Output(#[source] serde_json::Error),
}

/// Execute a configured query and return the result as pretty JSON.
///
/// Station queries produce a [`BoardSnapshot`]; train queries produce the
/// list of upcoming stops (empty if the train is not in the feed).
pub fn run(config: &RunConfig) -> Result<String, AppError> {
    let trains = load_trains(&config.trains_file)?;

    // Station metadata only enriches results, so a missing file is not fatal
    let lookup = match &config.stations_file {
        Some(path) => load_stations(path).unwrap_or_else(|e| {
            warn!("continuing without station metadata: {e}");
            StationLookup::new()
        }),
        None => StationLookup::new(),
    };

    let stale = match &config.stale_file {
        Some(path) => load_stale(path).unwrap_or_else(|e| {
            warn!("assuming fresh data: {e}");
            false
        }),
        None => false,
    };

    let now = config.resolve_now();
    let selector = ArrivalSelector::new(config.selector.clone());

    match &config.query {
        Query::Station(station) => {
            let arrivals = selector.select_for_station(&trains, station, now, Some(&lookup));
            let board = BoardSnapshot::build(station.clone(), now, arrivals, stale);
            info!(%station, arrivals = board.upcoming_trains.len(), stale, "built station board");
            serde_json::to_string_pretty(&board).map_err(AppError::Output)
        }
        Query::Train(train_num) => {
            let arrivals = match find_train(&trains, train_num) {
                Some(train) => selector.select_for_train(train, now, &lookup),
                None => {
                    warn!(train = %train_num, "train not found in feed");
                    Vec::new()
                }
            };
            info!(train = %train_num, stops = arrivals.len(), "selected train stops");
            serde_json::to_string_pretty(&arrivals).map_err(AppError::Output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StationCode, parse_timestamp};
    use crate::selector::SelectorConfig;
    use std::io::Write;
    use std::path::PathBuf;

    const TRAINS: &str = r#"{
        "3": [{
            "trainNum": "3",
            "routeName": "Southwest Chief",
            "origName": "Chicago Union Station",
            "origCode": "CHI",
            "destName": "Los Angeles Union Station",
            "destCode": "LAX",
            "lat": 35.1,
            "lon": -111.2,
            "statusMsg": " ",
            "stations": [
                {"code": "ABQ", "status": "Departed", "schArr": "2024-01-01T03:00:00-07:00"},
                {"code": "FLG", "status": "Enroute", "schArr": "2024-01-01T05:10:00-07:00"},
                {"code": "KNG", "status": "Enroute", "schArr": "2024-01-01T07:30:00-07:00"}
            ]
        }],
        "4": [{
            "trainNum": "4",
            "routeName": "Southwest Chief",
            "stations": [
                {"code": "FLG", "status": "Departed", "schArr": "2024-01-01T04:00:00-07:00"}
            ]
        }]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn run_config(trains: PathBuf, query: Query) -> RunConfig {
        RunConfig {
            trains_file: trains,
            stations_file: None,
            stale_file: None,
            query,
            now: parse_timestamp("2024-01-01T12:00:00Z"),
            selector: SelectorConfig::default(),
        }
    }

    #[test]
    fn station_board_end_to_end() {
        let trains = write_temp(TRAINS);
        let stations = write_temp(r#"{"FLG": {"name": "Flagstaff", "lat": 35.19, "lon": -111.64}}"#);
        let stale = write_temp(r#"{"stale": true}"#);
        let mut config = run_config(
            trains.path().to_path_buf(),
            Query::Station(StationCode::parse("flg").unwrap()),
        );
        config.stations_file = Some(stations.path().to_path_buf());
        config.stale_file = Some(stale.path().to_path_buf());

        let output = run(&config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["station_code"], "FLG");
        assert_eq!(json["stale"], true);
        assert_eq!(json["upcoming_trains"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["display_trains"].as_array().map(Vec::len), Some(1));
        assert_eq!(json["display_trains"][0]["trainNum"], "3");
        let next = &json["next_train"];
        assert_eq!(next["trainNum"], "3");
        assert_eq!(next["arrivalTime"], "2024-01-01T12:10:00.000Z");
        assert_eq!(next["etaMinutes"], 10);
        assert_eq!(next["statusMsg"], "On time");
        assert_eq!(next["timeSource"], "scheduled");
        assert_eq!(next["stationName"], "Flagstaff");
        assert_eq!(next["stationLocation"]["lat"], 35.19);
    }

    #[test]
    fn train_query_end_to_end() {
        let trains = write_temp(TRAINS);
        let config = run_config(trains.path().to_path_buf(), Query::Train("3".to_string()));

        let output = run(&config).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        let stops = json.as_array().unwrap();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0]["stationCode"], "FLG");
        assert_eq!(stops[0]["origin"]["code"], "ABQ");
        assert_eq!(stops[1]["stationCode"], "KNG");
        assert_eq!(stops[1]["origin"]["code"], "FLG");
    }

    #[test]
    fn unknown_train_gives_empty_list() {
        let trains = write_temp(TRAINS);
        let config = run_config(trains.path().to_path_buf(), Query::Train("99".to_string()));

        assert_eq!(run(&config).unwrap(), "[]");
    }

    #[test]
    fn missing_optional_files_are_tolerated() {
        let trains = write_temp(TRAINS);
        let dir = tempfile::tempdir().unwrap();
        let mut config = run_config(
            trains.path().to_path_buf(),
            Query::Station(StationCode::parse("FLG").unwrap()),
        );
        config.stations_file = Some(dir.path().join("stations.json"));
        config.stale_file = Some(dir.path().join("stale.json"));

        let json: serde_json::Value = serde_json::from_str(&run(&config).unwrap()).unwrap();

        assert_eq!(json["stale"], false);
        assert!(json["next_train"].get("stationName").is_none());
    }

    #[test]
    fn missing_trains_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let config = run_config(
            dir.path().join("trains.json"),
            Query::Station(StationCode::parse("FLG").unwrap()),
        );

        let err = run(&config).unwrap_err();
        assert!(matches!(err, AppError::Feed(FeedError::Io { .. })));
        assert!(err.to_string().starts_with("feed error: failed to read "));
    }
}
