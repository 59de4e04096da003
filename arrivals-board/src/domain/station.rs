//! Station code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Longest station code we accept.
///
/// Amtrak codes are three letters, but the feed occasionally carries
/// longer internal identifiers for bus connections.
const MAX_CODE_LEN: usize = 8;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A normalized station code (e.g. `FLG`, `LAX`).
///
/// Parsing trims surrounding whitespace and upper-cases the input, so
/// two codes compare equal whenever their inputs match case-insensitively.
///
/// # Examples
///
/// ```
/// use arrivals_board::domain::StationCode;
///
/// let flg = StationCode::parse(" flg ").unwrap();
/// assert_eq!(flg.as_str(), "FLG");
///
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("F-G").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode(String);

impl StationCode {
    /// Parse a station code, normalizing case and whitespace.
    ///
    /// The trimmed input must be 1 to 8 ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationCode {
                reason: "must not be empty",
            });
        }

        if trimmed.len() > MAX_CODE_LEN {
            return Err(InvalidStationCode {
                reason: "must be at most 8 characters",
            });
        }

        if !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(InvalidStationCode {
                reason: "must be ASCII letters or digits",
            });
        }

        Ok(StationCode(trimmed.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a raw code from a feed refers to this station.
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(&self.0)
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any alphanumeric code parses to its upper-cased form
        #[test]
        fn parse_uppercases(s in "[A-Za-z0-9]{1,8}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.to_ascii_uppercase());
        }

        /// A parsed code matches its own input regardless of case
        #[test]
        fn matches_own_input(s in "[A-Za-z0-9]{1,8}") {
            let code = StationCode::parse(&s).unwrap();
            prop_assert!(code.matches(&s.to_ascii_lowercase()));
            prop_assert!(code.matches(&s.to_ascii_uppercase()));
        }

        /// Codes longer than the limit are always rejected
        #[test]
        fn long_codes_rejected(s in "[A-Z]{9,16}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
