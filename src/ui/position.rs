use crate::core::geo::{format_degrees, LatLng};
use std::fmt;

/// The "current position" panel: one coordinate in every display format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionReadout {
    pub latitude: String,
    pub longitude: String,
    pub decimal: String,
    pub dms: String,
}

impl From<LatLng> for PositionReadout {
    fn from(position: LatLng) -> Self {
        Self {
            latitude: format_degrees(position.lat()),
            longitude: format_degrees(position.lng()),
            decimal: position.to_decimal_string(),
            dms: position.to_dms_string(),
        }
    }
}

impl fmt::Display for PositionReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Latitude: {}", self.latitude)?;
        writeln!(f, "Longitude: {}", self.longitude)?;
        writeln!(f, "Decimal Degrees: {}", self.decimal)?;
        write!(f, "DMS: {}", self.dms)
    }
}
