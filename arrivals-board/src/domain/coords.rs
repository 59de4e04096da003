//! Geographic coordinates.

use serde::Serialize;

/// A latitude/longitude pair in decimal degrees.
///
/// Only constructed when both components are finite, so a present
/// `Coordinates` is always safe to hand to a map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    /// Build a pair if both components are finite numbers.
    ///
    /// ```
    /// use arrivals_board::domain::Coordinates;
    ///
    /// assert!(Coordinates::new(35.19, -111.65).is_some());
    /// assert!(Coordinates::new(f64::NAN, -111.65).is_none());
    /// ```
    pub fn new(lat: f64, lon: f64) -> Option<Self> {
        (lat.is_finite() && lon.is_finite()).then_some(Self { lat, lon })
    }

    /// Build a pair from optional components; absent halves yield `None`.
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        Self::new(lat?, lon?)
    }
}
