//! Spatial engines that perform geometry conversions on behalf of the field.
//!
//! The field itself never parses geometry. Every conversion is delegated to a
//! [`SpatialEngine`], normally PostGIS through [`postgis::PostgisEngine`].

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

pub mod native;
#[cfg(feature = "postgis")]
pub mod postgis;

pub use native::NativeEngine;
#[cfg(feature = "postgis")]
pub use postgis::PostgisEngine;

/// The three conversions a map field needs from its spatial backend.
///
/// Each method corresponds to one read-only query. Malformed input is reported as an error
/// by the engine and is never recovered from by the caller.
#[async_trait]
pub trait SpatialEngine: Send + Sync {
    /// Convert a stored geometry value to GeoJSON geometry text.
    async fn geometry_to_geojson(&self, geometry: &str) -> Result<String>;

    /// Compute the centroid of a stored geometry value, as GeoJSON point text.
    async fn centroid_to_geojson(&self, geometry: &str) -> Result<String>;

    /// Convert GeoJSON geometry text to well-known-text.
    async fn geojson_to_wkt(&self, geojson: &str) -> Result<String>;
}

#[async_trait]
impl<E: SpatialEngine + ?Sized> SpatialEngine for &E {
    async fn geometry_to_geojson(&self, geometry: &str) -> Result<String> {
        (**self).geometry_to_geojson(geometry).await
    }

    async fn centroid_to_geojson(&self, geometry: &str) -> Result<String> {
        (**self).centroid_to_geojson(geometry).await
    }

    async fn geojson_to_wkt(&self, geojson: &str) -> Result<String> {
        (**self).geojson_to_wkt(geojson).await
    }
}

#[async_trait]
impl<E: SpatialEngine + ?Sized> SpatialEngine for Arc<E> {
    async fn geometry_to_geojson(&self, geometry: &str) -> Result<String> {
        (**self).geometry_to_geojson(geometry).await
    }

    async fn centroid_to_geojson(&self, geometry: &str) -> Result<String> {
        (**self).centroid_to_geojson(geometry).await
    }

    async fn geojson_to_wkt(&self, geojson: &str) -> Result<String> {
        (**self).geojson_to_wkt(geojson).await
    }
}
