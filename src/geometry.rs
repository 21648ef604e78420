//! Value types exchanged between the spatial engine and the map widget.

use serde::ser::SerializeTuple;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Geometry in well-known-text form, as produced by the spatial engine.
///
/// Two values are equal only when their text is identical. Normalize both sides through the
/// same engine before comparing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WktGeometry(String);

impl WktGeometry {
    pub fn new(wkt: impl Into<String>) -> Self {
        Self(wkt.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WktGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for WktGeometry {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for WktGeometry {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<WktGeometry> for String {
    fn from(value: WktGeometry) -> Self {
        value.0
    }
}

/// Initial view center for the map widget.
///
/// Spatial engines report coordinates as `[x, y]`, i.e. `[longitude, latitude]`. The widget
/// expects `[latitude, longitude]`, which is how this type serializes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl Center {
    /// Build a center from an engine-ordered `(x, y)` pair.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lon }
    }

    pub fn as_lat_lon(&self) -> [f64; 2] {
        [self.lat, self.lon]
    }
}

impl Serialize for Center {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tuple = serializer.serialize_tuple(2)?;
        tuple.serialize_element(&self.lat)?;
        tuple.serialize_element(&self.lon)?;
        tuple.end()
    }
}

/// GeoJSON rendering of a stored geometry, plus its centroid.
///
/// Computed fresh on every resolve and never persisted, so `center` always matches `geojson`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonRepresentation {
    /// GeoJSON geometry text.
    pub geojson: String,
    pub center: Center,
}
