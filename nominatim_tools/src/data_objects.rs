use serde::Deserialize;
use smp_common::Coordinates;

use crate::NominatimApiError;

/// A single match from the Nominatim `/search` endpoint (`format=jsonv2`).
///
/// Only the fields we consume are deserialized; the response carries many more.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub place_id: u64,
    /// Latitude as a decimal string, e.g. `"40.7127281"`.
    pub lat: String,
    /// Longitude as a decimal string, e.g. `"-74.0060152"`.
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl Place {
    pub fn coordinates(&self) -> Result<Coordinates, NominatimApiError> {
        let latitude = self
            .lat
            .parse::<f64>()
            .map_err(|e| NominatimApiError::UnexpectedError(format!("Invalid latitude '{}': {e}", self.lat)))?;
        let longitude = self
            .lon
            .parse::<f64>()
            .map_err(|e| NominatimApiError::UnexpectedError(format!("Invalid longitude '{}': {e}", self.lon)))?;
        Coordinates::new(latitude, longitude).map_err(|e| NominatimApiError::UnexpectedError(e.to_string()))
    }
}
