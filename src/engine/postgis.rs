//! [`SpatialEngine`] backed by the PostGIS extension of a PostgreSQL database.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::{Postgres, Row};
use tracing::debug;

use crate::engine::SpatialEngine;
use crate::error::{MapFieldError, Result};

// Input is always bound as a text parameter, never spliced into the statement.
pub(crate) const GEOMETRY_TO_GEOJSON_SQL: &str = "SELECT ST_AsGeoJSON($1::geometry) AS g";
pub(crate) const CENTROID_TO_GEOJSON_SQL: &str =
    "SELECT ST_AsGeoJSON(ST_Centroid($1::geometry)) AS g";
pub(crate) const GEOJSON_TO_WKT_SQL: &str = "SELECT ST_AsText(ST_GeomFromGeoJSON($1)) AS wkt";

/// Runs the conversions as single-row queries against a connection pool owned by the host.
#[derive(Debug, Clone)]
pub struct PostgisEngine {
    pool: PgPool,
}

impl PostgisEngine {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_text(&self, sql: &'static str, column: &str, input: &str) -> Result<String> {
        debug!(sql, input_len = input.len(), "running postgis conversion");
        let row: PgRow = sqlx::query::<Postgres>(sql)
            .bind(input)
            .fetch_one(&self.pool)
            .await?;
        let value: Option<String> = row.try_get(column)?;
        value.ok_or_else(|| {
            MapFieldError::General(format!("postgis returned NULL for column {}", column))
        })
    }
}

#[async_trait]
impl SpatialEngine for PostgisEngine {
    async fn geometry_to_geojson(&self, geometry: &str) -> Result<String> {
        self.fetch_text(GEOMETRY_TO_GEOJSON_SQL, "g", geometry).await
    }

    async fn centroid_to_geojson(&self, geometry: &str) -> Result<String> {
        self.fetch_text(CENTROID_TO_GEOJSON_SQL, "g", geometry).await
    }

    async fn geojson_to_wkt(&self, geojson: &str) -> Result<String> {
        self.fetch_text(GEOJSON_TO_WKT_SQL, "wkt", geojson).await
    }
}
