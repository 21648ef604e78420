//! The contract between a host admin panel and the fields it renders.
//!
//! A host resolves each field against a model before rendering, and fills the model from the
//! submitted form before saving. Fields implement [`FieldLifecycle`]; models implement
//! [`Model`].

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::Result;
use crate::payload::SubmittedGeoJson;

/// Attribute access on a host model instance.
pub trait Model: Send + Sync {
    /// Current in-memory value of an attribute, `None` when absent or NULL.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Assign an attribute. This is the host's default fill behavior; it does not persist.
    fn fill_attribute(&mut self, name: &str, value: Option<String>);
}

/// A model held as a map of attribute names to nullable text values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    attributes: BTreeMap<String, Option<String>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Whether the attribute was ever set, even to NULL.
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

impl Model for Record {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned().flatten()
    }

    fn fill_attribute(&mut self, name: &str, value: Option<String>) {
        self.attributes.insert(name.to_string(), value);
    }
}

/// Rendering metadata attached to a field, merged into its JSON form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldMeta(Map<String, Value>);

impl FieldMeta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// Whether a fill wrote to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    Written,
    Unchanged,
}

/// Hooks a host calls on a field during a request.
#[async_trait]
pub trait FieldLifecycle {
    /// Read hook. Loads the attribute from `model` and attaches rendering metadata.
    ///
    /// `attribute` overrides the field's own attribute name when given.
    async fn resolve(&mut self, model: &dyn Model, attribute: Option<&str>) -> Result<()>;

    /// Write hook. Fills `attribute` on `model` from the submitted value when warranted.
    async fn fill(
        &self,
        model: &mut dyn Model,
        value: Option<SubmittedGeoJson>,
        attribute: &str,
    ) -> Result<FillOutcome>;
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_attributes() {
        let mut record = Record::new()
            .with_attribute("zone", Some("POINT(1 2)".to_string()))
            .with_attribute("area", None);
        assert_eq!(record.attribute("zone").as_deref(), Some("POINT(1 2)"));
        assert_eq!(record.attribute("area"), None);
        assert!(record.contains("area"));
        assert!(!record.contains("missing"));

        record.fill_attribute("zone", None);
        assert_eq!(record.attribute("zone"), None);
    }

    #[test]
    fn meta_serializes_as_object() {
        let mut meta = FieldMeta::new();
        assert!(meta.is_empty());
        meta.insert("center", json!([0.5, 0.5]));
        meta.insert("geojson", "{}");
        assert_eq!(
            serde_json::to_value(&meta).unwrap(),
            json!({"center": [0.5, 0.5], "geojson": "{}"})
        );
        assert_eq!(meta.remove("geojson"), Some(json!("{}")));
        meta.clear();
        assert!(meta.get("center").is_none());
    }
}
