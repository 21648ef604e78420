//! A multi-polygon map field for admin panels, backed by PostGIS.
//!
//! [`MapMultiPolygon`](field::MapMultiPolygon) binds a geometry column to the
//! `map-multi-polygon` map widget. Reading renders the stored geometry as GeoJSON with a
//! `[lat, lon]` center for the initial view; writing converts the submitted GeoJSON back to
//! well-known-text and only touches the model when the geometry actually changed.
//!
//! All geometry work is done by a [`SpatialEngine`](engine::SpatialEngine): PostGIS through
//! `sqlx` with the `postgis` feature, or the in-process [`NativeEngine`](engine::NativeEngine).
//!
//! ```
//! use map_multipolygon::engine::NativeEngine;
//! use map_multipolygon::field::MapMultiPolygon;
//! use map_multipolygon::lifecycle::{FieldLifecycle, Model, Record};
//! use map_multipolygon::payload::SubmittedGeoJson;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let mut field = MapMultiPolygon::new("Zone", NativeEngine::new());
//! let mut record = Record::new().with_attribute(
//!     "zone",
//!     Some("MULTIPOLYGON(((0 0,0 1,1 1,1 0,0 0)))".to_string()),
//! );
//!
//! field.resolve(&record, None).await.unwrap();
//! assert_eq!(field.meta().get("center").unwrap(), &serde_json::json!([0.5, 0.5]));
//!
//! let submitted = SubmittedGeoJson::from_raw(Some("null"));
//! field.fill(&mut record, submitted, "zone").await.unwrap();
//! assert_eq!(record.attribute("zone"), None);
//! # });
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

#[cfg(feature = "postgis")]
pub mod config;
pub mod engine;
pub mod error;
pub mod field;
pub mod geometry;
pub mod lifecycle;
pub mod payload;

pub use engine::SpatialEngine;
pub use error::{MapFieldError, Result};
pub use field::MapMultiPolygon;
