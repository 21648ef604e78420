//! The multi-polygon map field.

use async_trait::async_trait;
use geojson::{GeoJson, Geometry, Value as GeoJsonValue};
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::debug;

use crate::engine::SpatialEngine;
use crate::error::{MapFieldError, Result};
use crate::geometry::{Center, GeoJsonRepresentation, WktGeometry};
use crate::lifecycle::{FieldLifecycle, FieldMeta, FillOutcome, Model};
use crate::payload::SubmittedGeoJson;

/// Result of comparing a submitted geometry against the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageDecision {
    /// The geometry changed; store this value (`None` clears the column).
    Write(Option<WktGeometry>),
    /// The geometry is equivalent to what is stored; leave the model untouched.
    Unchanged,
}

/// Binds a multi-polygon geometry column to the `map-multi-polygon` widget.
///
/// On read the stored geometry is rendered as GeoJSON plus a `[lat, lon]` center. On write
/// the submitted GeoJSON is converted back to WKT and only stored when it differs from the
/// current value, both sides normalized through the same engine.
#[derive(Debug, Clone)]
pub struct MapMultiPolygon<E> {
    name: String,
    attribute: String,
    engine: E,
    value: Option<String>,
    meta: FieldMeta,
}

impl<E: SpatialEngine> MapMultiPolygon<E> {
    /// Front-end component rendering this field.
    pub const COMPONENT: &'static str = "map-multi-polygon";

    /// Create a field whose attribute is derived from its display name, e.g. `"Service Area"`
    /// binds `service_area`.
    pub fn new(name: impl Into<String>, engine: E) -> Self {
        let name = name.into();
        let attribute = name.to_lowercase().replace(' ', "_");
        Self {
            name,
            attribute,
            engine,
            value: None,
            meta: FieldMeta::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Attach static metadata, kept across resolves.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key, value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn component(&self) -> &'static str {
        Self::COMPONENT
    }

    /// Raw stored value captured by the last resolve.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn meta(&self) -> &FieldMeta {
        &self.meta
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Render a stored geometry. Absent input yields `None` without touching the engine.
    pub async fn geometry_to_geojson(
        &self,
        geometry: Option<&str>,
    ) -> Result<Option<GeoJsonRepresentation>> {
        let Some(geometry) = geometry else {
            return Ok(None);
        };
        let geojson = self.engine.geometry_to_geojson(geometry).await?;
        let centroid = self.engine.centroid_to_geojson(geometry).await?;
        let center = parse_center(&centroid)?;
        Ok(Some(GeoJsonRepresentation { geojson, center }))
    }

    /// Convert submitted GeoJSON to WKT. Absent input yields `None` without touching the engine.
    pub async fn geojson_to_geometry(
        &self,
        geojson: Option<&SubmittedGeoJson>,
    ) -> Result<Option<WktGeometry>> {
        match geojson {
            Some(geojson) => {
                let wkt = self.engine.geojson_to_wkt(geojson.as_str()).await?;
                Ok(Some(WktGeometry::from(wkt)))
            }
            None => Ok(None),
        }
    }

    pub async fn resolve_for_display(
        &self,
        stored: Option<&str>,
    ) -> Result<Option<GeoJsonRepresentation>> {
        self.geometry_to_geojson(stored).await
    }

    /// Decide whether `submitted` should replace `current`.
    ///
    /// The current value goes through the same geometry -> GeoJSON -> WKT path as the
    /// submission, so formatting differences in the stored text never count as a change.
    pub async fn resolve_for_storage(
        &self,
        submitted: Option<&SubmittedGeoJson>,
        current: Option<&str>,
    ) -> Result<StorageDecision> {
        let new_value = self.geojson_to_geometry(submitted).await?;

        let baseline = match current {
            Some(current) => {
                let geojson = self.engine.geometry_to_geojson(current).await?;
                SubmittedGeoJson::from_raw(Some(geojson.as_str()))
            }
            None => None,
        };
        let old_value = self.geojson_to_geometry(baseline.as_ref()).await?;

        if new_value == old_value {
            Ok(StorageDecision::Unchanged)
        } else {
            Ok(StorageDecision::Write(new_value))
        }
    }

    /// The field as sent to the UI, with metadata merged into the top level.
    pub fn json_view(&self) -> Value {
        let mut view = Map::new();
        view.insert("component".into(), Self::COMPONENT.into());
        view.insert("name".into(), self.name.clone().into());
        view.insert("attribute".into(), self.attribute.clone().into());
        view.insert(
            "value".into(),
            self.value.clone().map_or(Value::Null, Value::String),
        );
        for (key, value) in self.meta.iter() {
            view.insert(key.clone(), value.clone());
        }
        Value::Object(view)
    }
}

/// Extract a [`Center`] from GeoJSON point text.
fn parse_center(centroid: &str) -> Result<Center> {
    let geometry = Geometry::try_from(GeoJson::from_str(centroid)?)?;
    match geometry.value {
        GeoJsonValue::Point(position) if position.len() >= 2 => {
            Ok(Center::from_lon_lat(position[0], position[1]))
        }
        _ => Err(MapFieldError::InvalidCentroid(centroid.to_string())),
    }
}

#[async_trait]
impl<E: SpatialEngine> FieldLifecycle for MapMultiPolygon<E> {
    async fn resolve(&mut self, model: &dyn Model, attribute: Option<&str>) -> Result<()> {
        let attribute = attribute.unwrap_or(self.attribute.as_str()).to_string();
        self.value = model.attribute(&attribute);
        self.meta.remove("geojson");
        self.meta.remove("center");

        let representation = self.geometry_to_geojson(self.value.as_deref()).await?;
        debug!(
            field = %self.name,
            attribute = %attribute,
            present = representation.is_some(),
            "resolved map field"
        );
        if let Some(representation) = representation {
            self.meta.insert("geojson", representation.geojson);
            self.meta
                .insert("center", serde_json::to_value(representation.center)?);
        }
        Ok(())
    }

    async fn fill(
        &self,
        model: &mut dyn Model,
        value: Option<SubmittedGeoJson>,
        attribute: &str,
    ) -> Result<FillOutcome> {
        let current = model.attribute(attribute);
        match self
            .resolve_for_storage(value.as_ref(), current.as_deref())
            .await?
        {
            StorageDecision::Write(new_value) => {
                debug!(
                    field = %self.name,
                    attribute,
                    cleared = new_value.is_none(),
                    "filling geometry"
                );
                model.fill_attribute(attribute, new_value.map(String::from));
                Ok(FillOutcome::Written)
            }
            StorageDecision::Unchanged => {
                debug!(field = %self.name, attribute, "geometry unchanged, skipping fill");
                Ok(FillOutcome::Unchanged)
            }
        }
    }
}
