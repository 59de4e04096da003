//! Station-scoped and train-scoped arrival selection.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, trace};

use super::config::SelectorConfig;
use super::status::{StatusInputs, derive_status};
use crate::domain::{
    ArrivalEvent, Endpoint, StationCode, StationLookup, StationStop, TrainRecord,
    choose_arrival_time, eta_minutes, parse_timestamp,
};

/// Turns train snapshots into ordered arrival lists.
///
/// Holds only configuration: every call is a pure function of its
/// arguments, so one selector can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct ArrivalSelector {
    config: SelectorConfig,
}

/// Per-leg context shared by both query modes.
struct LegContext<'a> {
    train: &'a TrainRecord,
    stop: &'a StationStop,
    station_code: String,
    origin: Endpoint,
    destination: Endpoint,
    grace: Duration,
}

impl ArrivalSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Upcoming arrivals at one station across all trains.
    ///
    /// Each train contributes at most one event, from the first stop in its
    /// itinerary at `station`. Stops already departed, without a usable
    /// time, or older than the station grace window are skipped. The result
    /// is sorted by arrival time; an empty list means "no arrivals".
    pub fn select_for_station(
        &self,
        trains: &[TrainRecord],
        station: &StationCode,
        now: DateTime<Utc>,
        lookup: Option<&StationLookup>,
    ) -> Vec<ArrivalEvent> {
        let mut arrivals = Vec::new();

        for train in trains {
            let Some(stop) = train.stop_at(station) else {
                continue;
            };

            if stop.status_contains_any(&self.config.station_skip_keywords) {
                trace!(train = %train.train_num, %station, "skipping departed stop");
                continue;
            }

            let leg = LegContext {
                train,
                stop,
                station_code: station.as_str().to_string(),
                origin: train.origin.clone(),
                destination: train.destination.clone(),
                grace: self.config.station_grace(),
            };
            if let Some(event) = self.build_event(leg, now, lookup) {
                arrivals.push(event);
            }
        }

        sort_by_arrival(&mut arrivals);
        debug!(
            %station,
            trains = trains.len(),
            arrivals = arrivals.len(),
            "selected station arrivals"
        );
        arrivals
    }

    /// Upcoming stops along one train's itinerary.
    ///
    /// Each event describes the leg from the previous stop (or the train's
    /// origin, for the first stop) to that stop. Departed or completed stops
    /// are skipped, and the tighter train grace window applies.
    pub fn select_for_train(
        &self,
        train: &TrainRecord,
        now: DateTime<Utc>,
        lookup: &StationLookup,
    ) -> Vec<ArrivalEvent> {
        let mut arrivals = Vec::new();

        for (idx, stop) in train.stops.iter().enumerate() {
            if stop.status_contains_any(&self.config.train_skip_keywords) {
                continue;
            }

            let origin = match idx.checked_sub(1).and_then(|prev| train.stops.get(prev)) {
                Some(prev) => stop_endpoint(prev, Some(lookup)),
                None => train.origin.clone(),
            };

            let leg = LegContext {
                train,
                stop,
                station_code: stop.code.trim().to_ascii_uppercase(),
                origin,
                destination: stop_endpoint(stop, Some(lookup)),
                grace: self.config.train_grace(),
            };
            if let Some(event) = self.build_event(leg, now, Some(lookup)) {
                arrivals.push(event);
            }
        }

        sort_by_arrival(&mut arrivals);
        debug!(
            train = %train.train_num,
            stops = train.stops.len(),
            arrivals = arrivals.len(),
            "selected train arrivals"
        );
        arrivals
    }

    /// Resolve times, filter stale stops and assemble the event.
    fn build_event(
        &self,
        leg: LegContext<'_>,
        now: DateTime<Utc>,
        lookup: Option<&StationLookup>,
    ) -> Option<ArrivalEvent> {
        let LegContext {
            train,
            stop,
            station_code,
            origin,
            destination,
            grace,
        } = leg;

        let Some(resolved) = choose_arrival_time(
            stop.actual_arrival.as_deref(),
            stop.scheduled_arrival.as_deref(),
        ) else {
            trace!(train = %train.train_num, station = %station_code, "no usable arrival time");
            return None;
        };

        // A window too large to subtract means nothing is too old
        let too_old = now
            .checked_sub_signed(grace)
            .is_some_and(|cutoff| resolved.time < cutoff);
        if too_old {
            trace!(train = %train.train_num, station = %station_code, "arrival outside grace window");
            return None;
        }

        let status = derive_status(
            StatusInputs {
                scheduled: stop.scheduled_arrival.as_deref().and_then(parse_timestamp),
                actual: stop.actual_arrival.as_deref().and_then(parse_timestamp),
                now,
                upstream: train.status_msg.as_deref(),
                stop_status: stop.status.as_deref(),
            },
            &self.config,
        );

        let enrichment = lookup.and_then(|l| l.get_raw(&station_code));
        let station_name = enrichment
            .and_then(|s| s.name.clone())
            .or_else(|| stop.name.clone());
        let station_location = enrichment.and_then(|s| s.position).or(stop.position);

        Some(ArrivalEvent {
            station_code,
            station_name,
            train_num: train.train_num.clone(),
            route_name: train.route_name.clone(),
            origin,
            destination,
            arrival_time: resolved.time,
            time_source: resolved.source,
            eta_minutes: eta_minutes(resolved.time, now),
            status,
            train_location: train.position,
            station_location,
        })
    }
}

/// Endpoint describing a stop, named from the lookup when possible.
fn stop_endpoint(stop: &StationStop, lookup: Option<&StationLookup>) -> Endpoint {
    let name = lookup
        .and_then(|l| l.get_raw(&stop.code))
        .and_then(|s| s.name.clone())
        .or_else(|| stop.name.clone())
        .unwrap_or_default();
    Endpoint::new(name, stop.code.clone())
}

/// Stable sort, so equal times keep feed order.
fn sort_by_arrival(arrivals: &mut [ArrivalEvent]) {
    arrivals.sort_by_key(|event| event.arrival_time);
}
