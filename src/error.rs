//! Defines [`MapFieldError`], representing all errors returned by this crate.

use std::fmt::Debug;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MapFieldError {
    /// General error.
    #[error("General error: {0}")]
    General(String),

    /// The centroid returned by the spatial engine has no usable coordinate pair.
    ///
    /// This happens for empty geometries, whose centroid is an empty point.
    #[error("Invalid centroid: {0}")]
    InvalidCentroid(String),

    /// A stored value could not be interpreted as geometry text.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// [geojson::Error]
    #[error(transparent)]
    GeoJsonError(#[from] geojson::Error),

    /// [geozero::error::GeozeroError]
    #[error(transparent)]
    GeozeroError(#[from] geozero::error::GeozeroError),

    /// [serde_json::Error]
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),

    /// [sqlx::Error]
    #[cfg(feature = "postgis")]
    #[error(transparent)]
    SqlxError(#[from] sqlx::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, MapFieldError>;
