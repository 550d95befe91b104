//! Collaborator seams
//!
//! The map surface, toast notifications, geocoding and device geolocation
//! all live outside this crate. These traits are what the session talks to;
//! hosts implement them on top of their map widget and browser APIs.

use crate::{
    core::{config::GeolocationOptions, geo::LatLng},
    Result,
};
use async_trait::async_trait;
use std::fmt;

/// Handle to a pin placed on the map surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinId(pub u64);

/// Map surface the session draws on
pub trait MapRenderer {
    /// Centers the map on `center` at `zoom`
    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Places a pin, optionally with popup text, and returns its handle
    fn place_pin(&mut self, position: LatLng, popup: Option<&str>) -> PinId;

    /// Removes a previously placed pin; unknown handles are ignored
    fn remove_pin(&mut self, pin: PinId);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Transient user-facing messages
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// A resolved free-text location
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub position: LatLng,
    pub display_name: String,
}

/// Free-text location search
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Resolves `query` to its best match; `Ok(None)` when nothing matched
    async fn search(&self, query: &str) -> Result<Option<GeocodeResult>>;
}

/// Why the device position could not be determined
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("geolocation is not supported")]
    Unsupported,
    #[error("permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("request timed out")]
    Timeout,
}

/// Device position lookup
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(
        &self,
        options: &GeolocationOptions,
    ) -> std::result::Result<LatLng, GeolocationError>;
}
