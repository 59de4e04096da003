//! Selector configuration.

use chrono::Duration;

/// Keywords used to classify free-text stop statuses.
///
/// The feed gives no formal contract for these strings, so this is a
/// best-effort list rather than an exhaustive classifier. Matching is a
/// case-insensitive substring test; keywords are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusKeywords {
    /// Stop status meaning the train is standing at the station.
    pub boarding: Vec<String>,

    /// Stop status meaning the train is on its way.
    pub on_time: Vec<String>,

    /// Stop status meaning the train has left.
    pub departed: Vec<String>,
}

impl Default for StatusKeywords {
    fn default() -> Self {
        Self {
            boarding: keywords(&["station"]),
            on_time: keywords(&["enroute", "en route"]),
            departed: keywords(&["departed"]),
        }
    }
}

/// Configuration parameters for arrival selection.
#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// How far in the past an arrival may be and still show on a
    /// station board (minutes).
    pub station_grace_mins: i64,

    /// How far in the past a stop may be and still show when following
    /// a single train (minutes).
    pub train_grace_mins: i64,

    /// Lateness at which a train is labelled "Delayed" (minutes).
    pub delay_threshold_mins: i64,

    /// Stop statuses that exclude a stop from station boards.
    pub station_skip_keywords: Vec<String>,

    /// Stop statuses that exclude a stop when following a train.
    pub train_skip_keywords: Vec<String>,

    /// Classification of stop statuses into labels.
    pub status_keywords: StatusKeywords,
}

impl SelectorConfig {
    /// Create a configuration with the given windows and default keywords.
    pub fn new(station_grace_mins: i64, train_grace_mins: i64, delay_threshold_mins: i64) -> Self {
        Self {
            station_grace_mins,
            train_grace_mins,
            delay_threshold_mins,
            ..Self::default()
        }
    }

    /// Returns the station-board grace window as a Duration.
    pub fn station_grace(&self) -> Duration {
        saturating_minutes(self.station_grace_mins)
    }

    /// Returns the train-view grace window as a Duration.
    pub fn train_grace(&self) -> Duration {
        saturating_minutes(self.train_grace_mins)
    }

    /// Returns the delay threshold as a Duration.
    pub fn delay_threshold(&self) -> Duration {
        saturating_minutes(self.delay_threshold_mins)
    }
}

/// Minutes as a Duration, clamped to the representable range.
fn saturating_minutes(mins: i64) -> Duration {
    Duration::try_minutes(mins).unwrap_or(if mins < 0 { Duration::MIN } else { Duration::MAX })
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            station_grace_mins: 15,
            train_grace_mins: 10,
            delay_threshold_mins: 5,
            station_skip_keywords: keywords(&["departed"]),
            train_skip_keywords: keywords(&["departed", "completed"]),
            status_keywords: StatusKeywords::default(),
        }
    }
}

fn keywords(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}
