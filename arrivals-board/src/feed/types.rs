//! Upstream feed DTOs.
//!
//! These map the train and station JSON payloads as loosely as possible.
//! Several upstream variants name the same field differently, so each
//! variant gets its own optional field and the conversion step picks the
//! first usable one. Everything is `Option` because the feed omits fields
//! rather than sending nulls.

use serde::Deserialize;

/// A JSON scalar that may arrive as a string, number or boolean.
///
/// Train numbers, for instance, are strings in one feed version and
/// numbers in another.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
}

impl RawScalar {
    /// Textual form, as the value would print.
    pub fn to_text(&self) -> String {
        match self {
            RawScalar::Text(s) => s.clone(),
            RawScalar::Number(n) => n.to_string(),
            RawScalar::Flag(b) => b.to_string(),
        }
    }

    /// Numeric value, accepting numeric strings. Non-finite values and
    /// blank strings yield `None`.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            RawScalar::Number(n) => n.as_f64()?,
            RawScalar::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                trimmed.parse::<f64>().ok()?
            }
            RawScalar::Flag(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

/// A train object from the in-service trains feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawTrain {
    /// Public train number (e.g. "3").
    pub train_num: Option<RawScalar>,

    /// Train identifier including the run date (e.g. "3-17").
    #[serde(rename = "trainID")]
    pub train_id: Option<RawScalar>,

    pub route_name: Option<RawScalar>,
    pub route: Option<RawScalar>,

    pub orig_name: Option<RawScalar>,
    pub origin: Option<RawScalar>,
    pub orig_code: Option<RawScalar>,
    pub origin_code: Option<RawScalar>,

    pub dest_name: Option<RawScalar>,
    pub destination: Option<RawScalar>,
    pub dest_code: Option<RawScalar>,
    pub destination_code: Option<RawScalar>,

    #[serde(flatten)]
    pub position: RawPosition,

    /// Train-level status message.
    pub status_msg: Option<RawScalar>,

    /// Itinerary. Kept as raw JSON so one malformed stop does not discard
    /// the whole train.
    pub stations: Option<serde_json::Value>,
}

/// A stop within a train's itinerary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStop {
    pub code: Option<RawScalar>,
    pub name: Option<RawScalar>,

    /// Stop status ("Departed", "Station", "Enroute", ...).
    pub status: Option<RawScalar>,

    /// Scheduled arrival.
    pub sch_arr: Option<RawScalar>,

    /// Actual or estimated arrival.
    pub arr: Option<RawScalar>,

    #[serde(flatten)]
    pub position: RawPosition,
}

/// An entry of the station metadata feed.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawStation {
    pub code: Option<RawScalar>,
    pub name: Option<RawScalar>,
    pub station_name: Option<RawScalar>,

    #[serde(flatten)]
    pub position: RawPosition,
}

/// Latitude/longitude under any of the spellings the feeds use.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPosition {
    pub lat: Option<RawScalar>,
    pub latitude: Option<RawScalar>,
    pub latit: Option<RawScalar>,

    pub lon: Option<RawScalar>,
    pub lng: Option<RawScalar>,
    pub long: Option<RawScalar>,
    pub longitude: Option<RawScalar>,
}
