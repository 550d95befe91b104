//! Core constants taken from the widget's defaults.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Key under which the marker collection is persisted.
pub const MARKER_STORAGE_KEY: &str = "savedMarkers";

/// Initial map center (Indonesia), latitude then longitude.
pub const DEFAULT_CENTER: (f64, f64) = (-2.5489, 118.0149);

/// Initial zoom level.
pub const DEFAULT_ZOOM: f64 = 5.0;

/// Zoom used after navigating to typed coordinates or a search hit.
pub const NAVIGATE_ZOOM: f64 = 13.0;

/// Zoom used after locating the device.
pub const LOCATE_ZOOM: f64 = 15.0;

/// Decimal places shown for latitude/longitude.
pub const COORDINATE_DISPLAY_PRECISION: usize = 6;

/// Decimal places shown for the seconds part of a DMS angle.
pub const DMS_SECONDS_PRECISION: usize = 2;

/// How long a temporary click/search pin stays on the map.
pub const TEMPORARY_PIN_LIFETIME_MS: u64 = 3_000;

/// How long a notification toast stays visible.
pub const NOTIFICATION_LIFETIME_MS: u64 = 5_000;

/// Geolocation request timeout.
pub const GEOLOCATION_TIMEOUT_MS: u64 = 10_000;

/// Maximum age of a cached device position.
pub const GEOLOCATION_MAXIMUM_AGE_MS: u64 = 60_000;
