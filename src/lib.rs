//! # mapmark
//!
//! Coordinate model and persisted marker store behind an interactive web map.
//!
//! The crate validates latitude/longitude input, renders positions as
//! decimal degrees and degrees-minutes-seconds, and keeps an ordered list of
//! user-created markers mirrored into a key-value store (browser
//! `localStorage`, a directory on disk, or memory). Map rendering,
//! notifications, geocoding and geolocation are reached through the
//! collaborator traits in [`traits`], and [`ui::session::MapSession`] wires
//! them together the way the map widget does.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod storage;
pub mod traits;
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{GeolocationOptions, MapConfig, ViewConfig},
    geo::{to_dms, validate, Axis, LatLng},
};

pub use crate::layers::{
    marker::{Marker, MarkerId},
    store::MarkerStore,
};

pub use crate::storage::{memory::MemoryStore, file::FileStore, KeyValueStore};

#[cfg(feature = "wasm")]
pub use crate::storage::browser::BrowserStorage;

pub use crate::traits::{
    GeocodeResult, Geocoder, GeolocationError, Geolocator, MapRenderer, Notifier, PinId, Severity,
};

pub use crate::ui::{
    builder::MapSessionBuilder,
    position::PositionReadout,
    session::{CoordinateInputs, MapSession},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{} must be between {} and {}", .axis.label(), .axis.min(), .axis.max())]
    Range { axis: Axis, value: f64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Index {index} is out of range for {len} markers")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("No marker with id {0}")]
    UnknownMarker(MarkerId),

    #[error("Corrupt persisted state: {0}")]
    CorruptState(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Geocoding error: {0}")]
    Geocoding(String),

    #[error("Geolocation error: {0}")]
    Geolocation(#[from] GeolocationError),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs the `env_logger` backend for the `log` facade.
///
/// Honours `RUST_LOG`. Calling it more than once is harmless.
#[cfg(feature = "debug")]
pub fn init_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
