use crate::core::geo::{format_degrees, LatLng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable marker identity, assigned in creation order and never reused
/// within a store. Unlike a position in the list it survives removals of
/// other markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

impl MarkerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-created point of interest
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    title: String,
    description: String,
    position: LatLng,
}

impl Marker {
    pub(crate) fn new(id: MarkerId, title: String, description: String, position: LatLng) -> Self {
        Self {
            id,
            title,
            description,
            position,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    /// Text shown in the pin popup: title, description when present, and
    /// the coordinate with six decimals
    pub fn popup_text(&self) -> String {
        let mut text = self.title.clone();
        if !self.description.is_empty() {
            text.push('\n');
            text.push_str(&self.description);
        }
        text.push_str("\nCoordinates: ");
        text.push_str(&self.position.to_decimal_string());
        text
    }

    /// Same marker with identity stripped, for order/content comparisons
    pub fn to_record(&self) -> MarkerRecord {
        MarkerRecord::from(self)
    }
}

/// Persisted shape of a marker: `{lat, lng, title, description}`.
///
/// Field order is the on-disk order. Ids and map pins are not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub lat: f64,
    pub lng: f64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl From<&Marker> for MarkerRecord {
    fn from(marker: &Marker) -> Self {
        Self {
            lat: marker.position.lat(),
            lng: marker.position.lng(),
            title: marker.title.clone(),
            description: marker.description.clone(),
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.title,
            format_degrees(self.position.lat()),
            format_degrees(self.position.lng())
        )
    }
}
