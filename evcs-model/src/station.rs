use crate::value::CellValue;
use serde::{Deserialize, Deserializer, Serialize};

/// A charging station as returned by `GET /get_stations`.
///
/// Coordinates are decimal degrees. The backend is not consistent about
/// sending them as numbers, so both numbers and numeric strings are accepted;
/// anything else is treated as missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(deserialize_with = "label")]
    pub station_id: String,
    #[serde(default, deserialize_with = "coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "coordinate")]
    pub longitude: Option<f64>,
    /// Whether the selected user has charged at this station.
    #[serde(default)]
    pub visited: bool,
}

impl Station {
    pub fn new(station_id: impl Into<String>, latitude: f64, longitude: f64, visited: bool) -> Self {
        Self {
            station_id: station_id.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            visited,
        }
    }

    /// `(latitude, longitude)` when both are present.
    ///
    /// A zero coordinate counts as missing: the backend uses `0` as a
    /// placeholder for stations it could not geocode.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Some((lat, lon)),
            _ => None,
        }
    }
}

fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = CellValue::deserialize(deserializer)?;
    Ok(value.to_string())
}

fn coordinate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = CellValue::deserialize(deserializer)?;
    Ok(value.as_number())
}
