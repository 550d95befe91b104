//! Nominatim `/search?format=json` response handling.
//!
//! Only the body is handled here; fetching it is up to the host's HTTP
//! client. Nominatim returns coordinates as strings.

use crate::{core::geo::LatLng, traits::GeocodeResult, MapError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

impl NominatimPlace {
    pub fn to_result(&self) -> Result<GeocodeResult> {
        let position = LatLng::parse(&self.lat, &self.lon)
            .map_err(|e| MapError::Geocoding(format!("bad coordinate in response: {}", e)))?;
        Ok(GeocodeResult {
            position,
            display_name: self.display_name.clone(),
        })
    }
}

/// First hit of a search response, `None` for an empty result list
pub fn parse_search_response(body: &str) -> Result<Option<GeocodeResult>> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|e| MapError::Geocoding(format!("unexpected response: {}", e)))?;
    places.first().map(NominatimPlace::to_result).transpose()
}
