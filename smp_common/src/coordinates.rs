use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resolved latitude/longitude pair.
///
/// The two halves always travel together. Code that has only one half of a
/// pair has nothing; there is no way to construct a `Coordinates` with a
/// missing hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Error)]
pub enum CoordinatesError {
    #[error("Latitude {0} is outside the range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is outside the range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinatesError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinatesError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinatesError::LongitudeOutOfRange(longitude));
        }
        Ok(Self { latitude, longitude })
    }

    /// Reassemble a pair from two nullable halves, e.g. two database columns.
    ///
    /// Returns `None` unless *both* halves are present. A half-pair is treated as absent rather
    /// than an error, since the storage layer never writes one.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self { latitude, longitude }),
            _ => None,
        }
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn valid_coordinates() {
        let c = Coordinates::new(40.7, -73.9).unwrap();
        assert_eq!(c.latitude, 40.7);
        assert_eq!(c.longitude, -73.9);
        assert_eq!(c.to_string(), "(40.70000, -73.90000)");
    }

    #[test]
    fn out_of_range_coordinates() {
        assert!(matches!(Coordinates::new(91.0, 0.0), Err(CoordinatesError::LatitudeOutOfRange(_))));
        assert!(matches!(Coordinates::new(0.0, -181.0), Err(CoordinatesError::LongitudeOutOfRange(_))));
    }

    #[test]
    fn from_parts_requires_both_halves() {
        assert!(Coordinates::from_parts(Some(1.0), None).is_none());
        assert!(Coordinates::from_parts(None, Some(1.0)).is_none());
        assert!(Coordinates::from_parts(None, None).is_none());
        let c = Coordinates::from_parts(Some(48.85), Some(2.35)).unwrap();
        assert_eq!(c, Coordinates { latitude: 48.85, longitude: 2.35 });
    }
}
