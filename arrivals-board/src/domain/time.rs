//! Timestamp handling for upstream feed times.
//!
//! The train feed mixes offset-qualified timestamps
//! (`2024-01-01T05:10:00-07:00`) with naive ones (`2024-01-01T12:10:00`).
//! Naive timestamps are treated as UTC.

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// Formats accepted for the date-time body when RFC 3339 parsing fails.
const FALLBACK_NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Offset-qualified minute-precision format (`2024-01-01T12:10-05:00`).
const FALLBACK_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Where a resolved arrival time came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSource {
    /// The stop reported an actual (or live estimated) arrival.
    Actual,
    /// Only the timetabled arrival was usable.
    Scheduled,
}

impl fmt::Display for TimeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSource::Actual => f.write_str("actual"),
            TimeSource::Scheduled => f.write_str("scheduled"),
        }
    }
}

/// An arrival instant together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTime {
    pub time: DateTime<Utc>,
    pub source: TimeSource,
}

/// Parse a feed timestamp into a UTC instant.
///
/// The input is trimmed. If it ends in `Z` or a `+HH:MM`/`-HH:MM` offset
/// it is parsed as-is; otherwise `Z` is appended so the value is read as
/// UTC. Returns `None` for empty or unparseable input.
///
/// # Examples
///
/// ```
/// use arrivals_board::domain::parse_timestamp;
///
/// let naive = parse_timestamp("2024-01-01T12:10:00").unwrap();
/// let zulu = parse_timestamp("2024-01-01T12:10:00Z").unwrap();
/// let offset = parse_timestamp("2024-01-01T05:10:00-07:00").unwrap();
/// assert_eq!(naive, zulu);
/// assert_eq!(naive, offset);
///
/// assert!(parse_timestamp("   ").is_none());
/// assert!(parse_timestamp("soon").is_none());
/// ```
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = if has_explicit_offset(cleaned) {
        Cow::Borrowed(cleaned)
    } else {
        Cow::Owned(format!("{cleaned}Z"))
    };

    if let Ok(parsed) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(parsed.with_timezone(&Utc));
    }

    if let Some(body) = normalized.strip_suffix('Z') {
        return parse_naive(body).map(|naive| naive.and_utc());
    }

    DateTime::parse_from_str(&normalized, FALLBACK_OFFSET_FORMAT)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

fn parse_naive(body: &str) -> Option<NaiveDateTime> {
    FALLBACK_NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(body, fmt).ok())
}

/// Whether a timestamp string ends in `Z` or a `±HH:MM` offset.
pub fn has_explicit_offset(s: &str) -> bool {
    if s.ends_with('Z') {
        return true;
    }

    let bytes = s.as_bytes();
    if bytes.len() < 6 {
        return false;
    }

    let tail = &bytes[bytes.len() - 6..];
    matches!(tail[0], b'+' | b'-')
        && tail[1].is_ascii_digit()
        && tail[2].is_ascii_digit()
        && tail[3] == b':'
        && tail[4].is_ascii_digit()
        && tail[5].is_ascii_digit()
}

/// Pick the arrival time for a stop: actual first, then scheduled.
///
/// Returns `None` when neither field parses; the stop cannot be shown.
pub fn choose_arrival_time(actual: Option<&str>, scheduled: Option<&str>) -> Option<ResolvedTime> {
    if let Some(time) = actual.and_then(parse_timestamp) {
        return Some(ResolvedTime {
            time,
            source: TimeSource::Actual,
        });
    }

    scheduled.and_then(parse_timestamp).map(|time| ResolvedTime {
        time,
        source: TimeSource::Scheduled,
    })
}

/// Whole minutes until `arrival`, rounded up.
///
/// Anything within one minute (or already past) counts as 0 so the board
/// does not flicker between "1 min" and "arriving".
pub fn eta_minutes(arrival: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let delta_ms = arrival.signed_duration_since(now).num_milliseconds();
    if delta_ms <= MILLIS_PER_MINUTE {
        return 0;
    }

    let minutes = (delta_ms + MILLIS_PER_MINUTE - 1) / MILLIS_PER_MINUTE;
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

/// Render an instant as ISO-8601 UTC with millisecond precision.
///
/// ```
/// use arrivals_board::domain::{format_iso, parse_timestamp};
///
/// let t = parse_timestamp("2024-01-01T12:10:00").unwrap();
/// assert_eq!(format_iso(t), "2024-01-01T12:10:00.000Z");
/// ```
pub fn format_iso(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde helper writing a `DateTime<Utc>` via [`format_iso`].
pub fn serialize_iso<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_iso(*time))
}
