//! Prelude module for common mapmark types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapmark::prelude::*;`

pub use crate::core::{
    config::{GeolocationOptions, MapConfig, ViewConfig},
    geo::{format_degrees, to_dms, validate, Axis, LatLng},
};

pub use crate::layers::{
    marker::{Marker, MarkerId, MarkerRecord},
    store::MarkerStore,
};

pub use crate::storage::{file::FileStore, memory::MemoryStore, KeyValueStore};

pub use crate::traits::{
    GeocodeResult, Geocoder, GeolocationError, Geolocator, MapRenderer, Notifier, PinId, Severity,
};

pub use crate::ui::{
    builder::MapSessionBuilder,
    position::PositionReadout,
    session::{CoordinateInputs, MapSession},
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
