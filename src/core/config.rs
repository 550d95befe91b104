//! Configuration for the map session
//!
//! Every field has a default matching the widget's built-in behaviour, so a
//! host only needs to supply the values it wants to change. Configuration can
//! be built in code or read from a (partial) JSON document.

use crate::{
    core::{
        constants::{
            DEFAULT_CENTER, DEFAULT_ZOOM, GEOLOCATION_MAXIMUM_AGE_MS, GEOLOCATION_TIMEOUT_MS,
            LOCATE_ZOOM, MARKER_STORAGE_KEY, NAVIGATE_ZOOM, NOTIFICATION_LIFETIME_MS,
            TEMPORARY_PIN_LIFETIME_MS,
        },
        geo::LatLng,
    },
    Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub initial_view: ViewConfig,
    pub navigate_zoom: f64,
    pub locate_zoom: f64,
    pub storage_key: String,
    pub temporary_pin_ms: u64,
    pub notification_ms: u64,
    pub geolocation: GeolocationOptions,
}

impl MapConfig {
    /// Reads a configuration document; absent fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn temporary_pin_lifetime(&self) -> Duration {
        Duration::from_millis(self.temporary_pin_ms)
    }

    pub fn notification_lifetime(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewConfig::default(),
            navigate_zoom: NAVIGATE_ZOOM,
            locate_zoom: LOCATE_ZOOM,
            storage_key: MARKER_STORAGE_KEY.to_string(),
            temporary_pin_ms: TEMPORARY_PIN_LIFETIME_MS,
            notification_ms: NOTIFICATION_LIFETIME_MS,
            geolocation: GeolocationOptions::default(),
        }
    }
}

/// Where the map starts out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let (lat, lng) = DEFAULT_CENTER;
        Self {
            center: LatLng::new_unchecked(lat, lng),
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// Options handed to the geolocation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

impl GeolocationOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn maximum_age(&self) -> Duration {
        Duration::from_millis(self.maximum_age_ms)
    }
}

impl Default for GeolocationOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: GEOLOCATION_TIMEOUT_MS,
            maximum_age_ms: GEOLOCATION_MAXIMUM_AGE_MS,
        }
    }
}
