use crate::{
    core::constants::{COORDINATE_DISPLAY_PRECISION, DMS_SECONDS_PRECISION},
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which angular axis a decimal-degree value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Smallest accepted value in decimal degrees
    pub fn min(self) -> f64 {
        match self {
            Axis::Latitude => -90.0,
            Axis::Longitude => -180.0,
        }
    }

    /// Largest accepted value in decimal degrees
    pub fn max(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// Hemisphere letter for a signed value on this axis
    pub fn hemisphere(self, value: f64) -> char {
        match (self, value >= 0.0) {
            (Axis::Latitude, true) => 'N',
            (Axis::Latitude, false) => 'S',
            (Axis::Longitude, true) => 'E',
            (Axis::Longitude, false) => 'W',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Latitude => "Latitude",
            Axis::Longitude => "Longitude",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated geographical coordinate in decimal degrees.
///
/// Fields are private so a `LatLng` can only be obtained through
/// [`LatLng::try_new`] or [`LatLng::parse`], both of which enforce
/// `lat ∈ [-90, 90]` and `lng ∈ [-180, 180]`. Values keep full `f64`
/// precision; only the display helpers round to six decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Creates a coordinate, rejecting non-finite or out-of-range values
    pub fn try_new(lat: f64, lng: f64) -> Result<Self> {
        check_axis(Axis::Latitude, lat)?;
        check_axis(Axis::Longitude, lng)?;
        Ok(Self { lat, lng })
    }

    /// Builds a coordinate from values already known to be in range
    pub(crate) const fn new_unchecked(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parses user-entered text for both axes.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a finite
    /// decimal number fails with [`MapError::Parse`]; a number outside its
    /// axis range fails with [`MapError::Range`]. Latitude is checked first.
    pub fn parse(lat_text: &str, lng_text: &str) -> Result<Self> {
        let lat = parse_degrees(Axis::Latitude, lat_text)?;
        let lng = parse_degrees(Axis::Longitude, lng_text)?;
        Self::try_new(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Value for the requested axis
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Latitude => self.lat,
            Axis::Longitude => self.lng,
        }
    }

    /// `lat, lng` with six decimals, the form used in inputs and popups
    pub fn to_decimal_string(&self) -> String {
        format!("{}, {}", format_degrees(self.lat), format_degrees(self.lng))
    }

    /// Both axes in degrees-minutes-seconds, latitude first
    pub fn to_dms_string(&self) -> String {
        format!(
            "{}, {}",
            to_dms(self.lat, Axis::Latitude),
            to_dms(self.lng, Axis::Longitude)
        )
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for LatLng {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            lat: f64,
            lng: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        LatLng::try_new(raw.lat, raw.lng).map_err(serde::de::Error::custom)
    }
}

/// Validates a pair of text inputs into a coordinate.
///
/// Free-function form of [`LatLng::parse`], mirroring how form fields are
/// handed over by the UI layer.
pub fn validate(lat_text: &str, lng_text: &str) -> Result<LatLng> {
    LatLng::parse(lat_text, lng_text)
}

/// Formats a decimal-degree value with the display precision (six decimals)
pub fn format_degrees(value: f64) -> String {
    format!("{:.*}", COORDINATE_DISPLAY_PRECISION, value)
}

/// Converts decimal degrees to `D° M' S.SS" <dir>`.
///
/// Degrees and minutes are truncated, seconds are printed with two
/// decimals. Seconds that round up to `60.00` are left as-is and never
/// carried into the minutes.
pub fn to_dms(value: f64, axis: Axis) -> String {
    let absolute = value.abs();
    let degrees = absolute.floor();
    let minutes_full = (absolute - degrees) * 60.0;
    let minutes = minutes_full.floor();
    let seconds = (minutes_full - minutes) * 60.0;

    format!(
        "{}° {}' {:.*}\" {}",
        degrees as u32,
        minutes as u32,
        DMS_SECONDS_PRECISION,
        seconds,
        axis.hemisphere(value)
    )
}

fn parse_degrees(axis: Axis, text: &str) -> Result<f64> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(MapError::Parse(format!(
            "{} {:?} is not a valid number",
            axis.label(),
            trimmed
        ))),
    }
}

fn check_axis(axis: Axis, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(MapError::Parse(format!(
            "{} {} is not a finite number",
            axis.label(),
            value
        )));
    }
    if !axis.contains(value) {
        return Err(MapError::Range { axis, value });
    }
    Ok(())
}
