//! Decoding of the GeoJSON value submitted by the map widget.
//!
//! The widget posts the literal text `null` once the user clears the drawing. That sentinel is
//! recognised here and nowhere else; past this boundary an absent value is `None`.

use serde_json::Value;

const NULL_SENTINEL: &str = "null";

/// Non-empty GeoJSON text submitted by the map widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedGeoJson(String);

impl SubmittedGeoJson {
    /// Decode a raw form value.
    ///
    /// Absent input, blank text and the `null` sentinel all mean "no geometry".
    pub fn from_raw(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == NULL_SENTINEL {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Decode a value taken from a JSON request body.
    ///
    /// Strings go through [`SubmittedGeoJson::from_raw`]; objects are kept as their compact
    /// serialization.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(raw) => Self::from_raw(Some(raw.as_str())),
            other => Some(Self(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn sentinel_and_blank_are_absent() {
        assert_eq!(SubmittedGeoJson::from_raw(None), None);
        assert_eq!(SubmittedGeoJson::from_raw(Some("null")), None);
        assert_eq!(SubmittedGeoJson::from_raw(Some("  null ")), None);
        assert_eq!(SubmittedGeoJson::from_raw(Some("")), None);
        assert_eq!(SubmittedGeoJson::from_raw(Some("\n")), None);
    }

    #[test]
    fn geojson_text_is_kept() {
        let raw = r#"{"type":"MultiPolygon","coordinates":[]}"#;
        let submitted = SubmittedGeoJson::from_raw(Some(raw)).unwrap();
        assert_eq!(submitted.as_str(), raw);
    }

    #[test]
    fn json_values() {
        assert_eq!(SubmittedGeoJson::from_json(&Value::Null), None);
        assert_eq!(SubmittedGeoJson::from_json(&json!("null")), None);

        let object = json!({"type": "Point", "coordinates": [1.0, 2.0]});
        let submitted = SubmittedGeoJson::from_json(&object).unwrap();
        let reparsed: Value = serde_json::from_str(submitted.as_str()).unwrap();
        assert_eq!(reparsed, object);

        let text = json!(r#"{"type":"Point","coordinates":[1,2]}"#);
        assert_eq!(
            SubmittedGeoJson::from_json(&text).unwrap().into_inner(),
            r#"{"type":"Point","coordinates":[1,2]}"#
        );
    }
}
