//! Status label derivation.

use chrono::{DateTime, Utc};

use super::config::{SelectorConfig, StatusKeywords};
use crate::domain::StatusLabel;

/// Inputs to [`derive_status`] for one stop.
#[derive(Debug, Clone, Copy)]
pub struct StatusInputs<'a> {
    pub scheduled: Option<DateTime<Utc>>,
    pub actual: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,

    /// Train-level status message from the feed.
    pub upstream: Option<&'a str>,

    /// Free-text status of the stop itself.
    pub stop_status: Option<&'a str>,
}

/// Derive the status label for a stop.
///
/// A priority cascade; the first matching rule wins:
/// 1. actual arrival at least the delay threshold after scheduled: Delayed
/// 2. no actual arrival and `now` past scheduled plus the threshold: Delayed
/// 3. non-empty upstream text: kept verbatim
/// 4. stop status classified by keyword
///
/// Rules 1 and 2 only apply when the scheduled time is known. A threshold
/// that overflows the scheduled time never makes a stop overdue.
pub fn derive_status(inputs: StatusInputs<'_>, config: &SelectorConfig) -> StatusLabel {
    let threshold = config.delay_threshold();

    if let Some(scheduled) = inputs.scheduled {
        match inputs.actual {
            Some(actual) if actual.signed_duration_since(scheduled) >= threshold => {
                return StatusLabel::Delayed;
            }
            None if scheduled
                .checked_add_signed(threshold)
                .is_some_and(|limit| inputs.now > limit) =>
            {
                return StatusLabel::Delayed;
            }
            _ => {}
        }
    }

    if let Some(text) = inputs.upstream.filter(|t| !t.trim().is_empty()) {
        return StatusLabel::Upstream(text.to_string());
    }

    classify_stop_status(inputs.stop_status, &config.status_keywords)
}

/// Map a free-text stop status onto a label.
///
/// Unrecognised or missing text is treated as on time.
pub fn classify_stop_status(status: Option<&str>, keywords: &StatusKeywords) -> StatusLabel {
    let lower = status.unwrap_or_default().to_lowercase();
    let has = |words: &[String]| words.iter().any(|w| lower.contains(w.as_str()));

    if has(&keywords.boarding) {
        StatusLabel::Boarding
    } else if has(&keywords.on_time) {
        StatusLabel::OnTime
    } else if has(&keywords.departed) {
        StatusLabel::Departed
    } else {
        StatusLabel::OnTime
    }
}
