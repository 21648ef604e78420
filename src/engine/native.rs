//! In-process [`SpatialEngine`] built on `geozero` and `geo`.
//!
//! Useful where no PostGIS instance is reachable. Stored values must be WKT or EWKT; the
//! hex-encoded EWKB that PostgreSQL emits for raw geometry columns is not understood.

use async_trait::async_trait;
use geo::Centroid;
use geozero::geojson::GeoJson;
use geozero::wkt::WktStr;
use geozero::{ToGeo, ToJson, ToWkt};

use crate::engine::SpatialEngine;
use crate::error::{MapFieldError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEngine;

impl NativeEngine {
    pub fn new() -> Self {
        Self
    }

    fn parse_stored(geometry: &str) -> Result<geo::Geometry<f64>> {
        let wkt = strip_srid(geometry)?;
        Ok(WktStr(wkt).to_geo()?)
    }
}

/// Drop an EWKT `SRID=<n>;` prefix, if present.
fn strip_srid(geometry: &str) -> Result<&str> {
    let trimmed = geometry.trim();
    let has_srid = trimmed
        .get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("SRID="));
    if !has_srid {
        return Ok(trimmed);
    }
    match trimmed.split_once(';') {
        Some((_, wkt)) => Ok(wkt.trim_start()),
        None => Err(MapFieldError::InvalidGeometry(format!(
            "SRID prefix without geometry: {}",
            trimmed
        ))),
    }
}

#[async_trait]
impl SpatialEngine for NativeEngine {
    async fn geometry_to_geojson(&self, geometry: &str) -> Result<String> {
        let geom = Self::parse_stored(geometry)?;
        Ok(geom.to_json()?)
    }

    async fn centroid_to_geojson(&self, geometry: &str) -> Result<String> {
        let geom = Self::parse_stored(geometry)?;
        let centroid = geom.centroid().ok_or_else(|| {
            MapFieldError::InvalidCentroid(format!("geometry has no centroid: {}", geometry))
        })?;
        Ok(geo::Geometry::Point(centroid).to_json()?)
    }

    async fn geojson_to_wkt(&self, geojson: &str) -> Result<String> {
        let geom = GeoJson(geojson).to_geo()?;
        Ok(geom.to_wkt()?)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    const SQUARE: &str = "MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))";

    fn coordinates(geojson: &str) -> serde_json::Value {
        let value: serde_json::Value = serde_json::from_str(geojson).unwrap();
        value["coordinates"].clone()
    }

    #[tokio::test]
    async fn test_geometry_to_geojson() {
        let geojson = NativeEngine.geometry_to_geojson(SQUARE).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&geojson).unwrap();
        assert_eq!(value["type"], "MultiPolygon");
        let rings: Vec<Vec<Vec<Vec<f64>>>> = serde_json::from_value(coordinates(&geojson)).unwrap();
        assert_eq!(
            rings,
            vec![vec![vec![
                vec![0., 0.],
                vec![0., 1.],
                vec![1., 1.],
                vec![1., 0.],
                vec![0., 0.]
            ]]]
        );
    }

    #[tokio::test]
    async fn test_centroid() {
        let geojson = NativeEngine
            .centroid_to_geojson("MULTIPOLYGON(((2 0,2 2,6 2,6 0,2 0)))")
            .await
            .unwrap();
        let coords = coordinates(&geojson);
        assert_relative_eq!(coords[0].as_f64().unwrap(), 4.);
        assert_relative_eq!(coords[1].as_f64().unwrap(), 1.);
    }

    #[tokio::test]
    async fn test_ewkt_prefix() {
        let plain = NativeEngine.geometry_to_geojson(SQUARE).await.unwrap();
        let ewkt = NativeEngine
            .geometry_to_geojson(&format!("SRID=4326;{}", SQUARE))
            .await
            .unwrap();
        assert_eq!(plain, ewkt);
        assert!(matches!(
            NativeEngine.geometry_to_geojson("SRID=4326").await,
            Err(MapFieldError::InvalidGeometry(_))
        ));
    }

    #[tokio::test]
    async fn test_round_trip_is_stable() {
        let geojson = NativeEngine.geometry_to_geojson(SQUARE).await.unwrap();
        let wkt = NativeEngine.geojson_to_wkt(&geojson).await.unwrap();
        assert!(wkt.starts_with("MULTIPOLYGON"));

        let again = NativeEngine.geometry_to_geojson(&wkt).await.unwrap();
        let wkt_again = NativeEngine.geojson_to_wkt(&again).await.unwrap();
        assert_eq!(wkt, wkt_again);
    }

    #[tokio::test]
    async fn test_malformed_input() {
        assert!(NativeEngine.geometry_to_geojson("MULTIPOLYGON(((").await.is_err());
        assert!(NativeEngine.geojson_to_wkt("{\"type\":").await.is_err());
    }

    #[tokio::test]
    async fn test_empty_geometry_has_no_centroid() {
        let result = NativeEngine.centroid_to_geojson("MULTIPOLYGON EMPTY").await;
        assert!(matches!(result, Err(MapFieldError::InvalidCentroid(_))));
    }
}
