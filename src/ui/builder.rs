//! Session builder for fluent configuration
//!
//! The map surface and the notifier are required; geocoding and geolocation
//! are optional and degrade to the widget's "not available" messages.

use crate::{
    core::config::MapConfig,
    layers::store::MarkerStore,
    storage::KeyValueStore,
    traits::{Geocoder, Geolocator, MapRenderer, Notifier},
    ui::session::MapSession,
    MapError, Result,
};

/// Builder for creating and configuring [`MapSession`] instances
pub struct MapSessionBuilder<S: KeyValueStore> {
    storage: S,
    config: MapConfig,
    renderer: Option<Box<dyn MapRenderer>>,
    notifier: Option<Box<dyn Notifier>>,
    geocoder: Option<Box<dyn Geocoder>>,
    geolocator: Option<Box<dyn Geolocator>>,
}

impl<S: KeyValueStore> MapSessionBuilder<S> {
    /// Start a builder persisting markers into `storage`
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            config: MapConfig::default(),
            renderer: None,
            notifier: None,
            geocoder: None,
            geolocator: None,
        }
    }

    pub fn with_config(mut self, config: MapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_renderer(mut self, renderer: impl MapRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    pub fn with_geocoder(mut self, geocoder: impl Geocoder + 'static) -> Self {
        self.geocoder = Some(Box::new(geocoder));
        self
    }

    pub fn with_geolocator(mut self, geolocator: impl Geolocator + 'static) -> Self {
        self.geolocator = Some(Box::new(geolocator));
        self
    }

    /// Build the session. The store starts empty; call
    /// [`MapSession::start`] to restore persisted markers.
    pub fn build(self) -> Result<MapSession<S>> {
        let renderer = self
            .renderer
            .ok_or_else(|| MapError::InvalidInput("a map renderer is required".to_string()))?;
        let notifier = self
            .notifier
            .ok_or_else(|| MapError::InvalidInput("a notifier is required".to_string()))?;
        let store = MarkerStore::with_key(self.storage, self.config.storage_key.clone());

        Ok(MapSession::from_parts(
            self.config,
            store,
            renderer,
            notifier,
            self.geocoder,
            self.geolocator,
        ))
    }
}

impl<S: KeyValueStore> MapSession<S> {
    /// Shorthand for [`MapSessionBuilder::new`]
    pub fn builder(storage: S) -> MapSessionBuilder<S> {
        MapSessionBuilder::new(storage)
    }
}
