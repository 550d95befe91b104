//! Map session controller
//!
//! Glues the coordinate model and the marker store to the collaborator
//! traits the way the map widget does: every user action ends in a map
//! update, a notification, or both. Operations also return their outcome so
//! hosts can react beyond the toast.

use crate::{
    core::{
        config::MapConfig,
        geo::{format_degrees, LatLng},
    },
    layers::{
        marker::{Marker, MarkerId},
        store::MarkerStore,
    },
    prelude::HashMap,
    storage::KeyValueStore,
    traits::{
        GeocodeResult, Geocoder, GeolocationError, Geolocator, MapRenderer, Notifier, PinId,
        Severity,
    },
    ui::position::PositionReadout,
    MapError, Result,
};

#[cfg(feature = "debug")]
use log::{debug, error, warn};

/// The latitude/longitude text fields of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateInputs {
    pub lat: String,
    pub lng: String,
}

impl CoordinateInputs {
    pub fn new(lat: impl Into<String>, lng: impl Into<String>) -> Self {
        Self {
            lat: lat.into(),
            lng: lng.into(),
        }
    }

    /// Inputs filled from a coordinate, six decimals each
    pub fn from_position(position: LatLng) -> Self {
        Self::new(format_degrees(position.lat()), format_degrees(position.lng()))
    }

    pub fn parse(&self) -> Result<LatLng> {
        LatLng::parse(&self.lat, &self.lng)
    }
}

pub struct MapSession<S: KeyValueStore> {
    config: MapConfig,
    store: MarkerStore<S>,
    renderer: Box<dyn MapRenderer>,
    notifier: Box<dyn Notifier>,
    geocoder: Option<Box<dyn Geocoder>>,
    geolocator: Option<Box<dyn Geolocator>>,
    inputs: CoordinateInputs,
    readout: Option<PositionReadout>,
    temporary_pin: Option<PinId>,
    pins: HashMap<MarkerId, PinId>,
}

impl<S: KeyValueStore> MapSession<S> {
    pub(crate) fn from_parts(
        config: MapConfig,
        store: MarkerStore<S>,
        renderer: Box<dyn MapRenderer>,
        notifier: Box<dyn Notifier>,
        geocoder: Option<Box<dyn Geocoder>>,
        geolocator: Option<Box<dyn Geolocator>>,
    ) -> Self {
        Self {
            config,
            store,
            renderer,
            notifier,
            geocoder,
            geolocator,
            inputs: CoordinateInputs::default(),
            readout: None,
            temporary_pin: None,
            pins: HashMap::default(),
        }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn store(&self) -> &MarkerStore<S> {
        &self.store
    }

    /// Current markers in display order
    pub fn markers(&self) -> Vec<Marker> {
        self.store.list()
    }

    pub fn inputs(&self) -> &CoordinateInputs {
        &self.inputs
    }

    /// Replaces the coordinate fields, as when the user types into them
    pub fn set_inputs(&mut self, inputs: CoordinateInputs) {
        self.inputs = inputs;
    }

    pub fn readout(&self) -> Option<&PositionReadout> {
        self.readout.as_ref()
    }

    pub fn temporary_pin(&self) -> Option<PinId> {
        self.temporary_pin
    }

    /// Map pin showing the given marker
    pub fn pin_for(&self, id: MarkerId) -> Option<PinId> {
        self.pins.get(&id).copied()
    }

    /// Shows the initial view and restores persisted markers.
    ///
    /// Corrupt persisted state is logged and ignored. Pins from an earlier
    /// start are removed first. Returns the number of markers restored.
    pub fn start(&mut self) -> usize {
        let view = self.config.initial_view.clone();
        self.renderer.set_view(view.center, view.zoom);

        for (_, pin) in self.pins.drain() {
            self.renderer.remove_pin(pin);
        }

        let count = self.store.load_or_empty();
        for marker in self.store.iter() {
            let pin = self
                .renderer
                .place_pin(marker.position(), Some(&marker.popup_text()));
            self.pins.insert(marker.id(), pin);
        }

        if count > 0 {
            self.notify(&format!("{} saved markers loaded", count), Severity::Info);
        }
        count
    }

    /// A click on the map surface: fill the inputs and drop a temporary pin
    pub fn handle_map_click(&mut self, position: LatLng) {
        self.inputs = CoordinateInputs::from_position(position);
        self.readout = Some(PositionReadout::from(position));
        self.replace_temporary_pin(position);
    }

    /// Navigates to the coordinate currently in the inputs
    pub fn go_to_coordinates(&mut self) -> Result<LatLng> {
        let position = match self.inputs.parse() {
            Ok(position) => position,
            Err(e) => {
                let message = match &e {
                    MapError::Range { .. } => e.to_string(),
                    _ => "Please enter valid coordinates".to_string(),
                };
                self.notify(&message, Severity::Warning);
                return Err(e);
            }
        };

        self.renderer.set_view(position, self.config.navigate_zoom);
        self.readout = Some(PositionReadout::from(position));
        self.replace_temporary_pin(position);
        self.notify(
            &format!("Navigated to coordinates: {}", position.to_decimal_string()),
            Severity::Success,
        );
        Ok(position)
    }

    /// Creates a marker at the coordinate in the inputs
    pub fn add_marker(&mut self, title: &str, description: &str) -> Result<MarkerId> {
        if title.trim().is_empty() {
            self.notify("Please enter a marker title", Severity::Warning);
            return Err(MapError::InvalidInput(
                "marker title must not be empty".to_string(),
            ));
        }

        let position = match self.inputs.parse() {
            Ok(position) => position,
            Err(e) => {
                let message = match &e {
                    MapError::Range { .. } => e.to_string(),
                    _ => "Please enter valid coordinates first".to_string(),
                };
                self.notify(&message, Severity::Warning);
                return Err(e);
            }
        };

        let marker = match self.store.create(title, description, position) {
            Ok(marker) => marker,
            Err(e) => {
                self.notify(&format!("Could not save marker: {}", e), Severity::Error);
                return Err(e);
            }
        };

        let pin = self
            .renderer
            .place_pin(marker.position(), Some(&marker.popup_text()));
        self.pins.insert(marker.id(), pin);
        self.notify(
            &format!("Marker \"{}\" added successfully", marker.title()),
            Severity::Success,
        );
        Ok(marker.id())
    }

    /// Removes one marker and its pin
    pub fn remove_marker(&mut self, id: MarkerId) -> Result<Marker> {
        let marker = match self.store.remove_by_id(id) {
            Ok(marker) => marker,
            Err(e @ MapError::UnknownMarker(_)) => {
                #[cfg(feature = "debug")]
                debug!("ignoring removal of unknown marker {}", id);
                return Err(e);
            }
            Err(e) => {
                self.notify(&format!("Could not remove marker: {}", e), Severity::Error);
                return Err(e);
            }
        };

        if let Some(pin) = self.pins.remove(&id) {
            self.renderer.remove_pin(pin);
        }
        self.notify("Marker removed successfully", Severity::Success);
        Ok(marker)
    }

    /// Removes every marker once `confirm` agrees.
    ///
    /// Returns whether anything was cleared.
    pub fn clear_markers(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool> {
        if self.store.is_empty() {
            self.notify("No markers to clear", Severity::Info);
            return Ok(false);
        }
        if !confirm() {
            return Ok(false);
        }

        if let Err(e) = self.store.clear() {
            self.notify(&format!("Could not clear markers: {}", e), Severity::Error);
            return Err(e);
        }

        for (_, pin) in self.pins.drain() {
            self.renderer.remove_pin(pin);
        }
        self.notify("All markers cleared", Severity::Success);
        Ok(true)
    }

    /// Looks up a place by name and focuses the map on the best match
    pub async fn search(&mut self, query: &str) -> Result<Option<GeocodeResult>> {
        let query = query.trim();
        if query.is_empty() {
            self.notify("Please enter a location to search", Severity::Warning);
            return Err(MapError::InvalidInput("empty search query".to_string()));
        }

        let outcome = match &self.geocoder {
            Some(geocoder) => geocoder.search(query).await,
            None => Err(MapError::Geocoding("no geocoder configured".to_string())),
        };

        match outcome {
            Ok(Some(hit)) => {
                self.focus(hit.position, self.config.navigate_zoom);
                self.notify(&format!("Found: {}", hit.display_name), Severity::Success);
                Ok(Some(hit))
            }
            Ok(None) => {
                self.notify(
                    "Location not found. Please try a different search term.",
                    Severity::Error,
                );
                Ok(None)
            }
            Err(e) => {
                #[cfg(feature = "debug")]
                error!("Search error: {}", e);
                self.notify(
                    "Error searching for location. Please try again.",
                    Severity::Error,
                );
                Err(e)
            }
        }
    }

    /// Focuses the map on the device position
    pub async fn locate(&mut self) -> Result<LatLng> {
        let outcome = match &self.geolocator {
            Some(geolocator) => geolocator.current_position(&self.config.geolocation).await,
            None => Err(GeolocationError::Unsupported),
        };

        match outcome {
            Ok(position) => {
                self.focus(position, self.config.locate_zoom);
                self.notify("Location found!", Severity::Success);
                Ok(position)
            }
            Err(e) => {
                #[cfg(feature = "debug")]
                warn!("Geolocation failed: {}", e);
                let message = match e {
                    GeolocationError::Unsupported => "Geolocation is not supported by this browser",
                    GeolocationError::PermissionDenied => {
                        "Location access denied. Please allow location access."
                    }
                    GeolocationError::PositionUnavailable => "Location information unavailable.",
                    GeolocationError::Timeout => "Location request timed out.",
                };
                self.notify(message, Severity::Error);
                Err(e.into())
            }
        }
    }

    /// Drops the temporary pin; hosts call this once
    /// [`MapConfig::temporary_pin_lifetime`] has passed
    pub fn expire_temporary_pin(&mut self) {
        if let Some(pin) = self.temporary_pin.take() {
            self.renderer.remove_pin(pin);
        }
    }

    fn focus(&mut self, position: LatLng, zoom: f64) {
        self.renderer.set_view(position, zoom);
        self.inputs = CoordinateInputs::from_position(position);
        self.readout = Some(PositionReadout::from(position));
        self.replace_temporary_pin(position);
    }

    fn replace_temporary_pin(&mut self, position: LatLng) {
        self.expire_temporary_pin();
        self.temporary_pin = Some(self.renderer.place_pin(position, None));
    }

    fn notify(&mut self, message: &str, severity: Severity) {
        self.notifier.notify(message, severity);
    }
}
