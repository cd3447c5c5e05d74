//! Schema data model and JSON parser
//!
//! Deserialises a JSON-Schema-shaped document into [`Schema`]. Property
//! order is significant — generated fields and the encoder's key order
//! follow declaration order — so properties live in an insertion-ordered
//! map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ── Schema ───────────────────────────────────────────────────────────────────

/// A named record type: `title` plus an ordered property map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// Record name, unique per generation run. Used as the struct name.
    pub title: String,
    /// Insertion-ordered property map. The map key is looked up
    /// independently at decode time; each descriptor's `title` is both the
    /// field identifier and the wire key.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDescriptor>,
}

impl Schema {
    /// Parse from a JSON document.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialise back to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ── Property descriptors ─────────────────────────────────────────────────────

/// Wire-level type of a property.
///
/// A closed enum: a schema naming any other type string fails at parse time,
/// which is where the unsupported-type compile error surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Integer,
    Number,
    Boolean,
    String,
    Array,
}

impl PropertyType {
    /// Lowercase wire spelling, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Integer => "integer",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::String => "string",
            PropertyType::Array => "array",
        }
    }
}

/// One property: field name, type, and — for arrays — the element
/// descriptor. Element descriptors carry no title of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<PropertyDescriptor>>,
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    pub const POINT_JSON: &str = r#"
    {
        "title": "Point",
        "properties": {
            "x": { "title": "x", "type": "integer" },
            "y": { "title": "y", "type": "integer" },
            "tags": {
                "title": "tags",
                "type": "array",
                "items": { "type": "string" }
            }
        }
    }
    "#;

    #[test]
    fn parses_point_schema() {
        let schema = Schema::from_json(POINT_JSON).unwrap();
        assert_eq!(schema.title, "Point");
        assert_eq!(schema.properties.len(), 3);
        let tags = &schema.properties["tags"];
        assert_eq!(tags.property_type, PropertyType::Array);
        assert_eq!(
            tags.items.as_ref().unwrap().property_type,
            PropertyType::String
        );
    }

    #[test]
    fn property_order_is_declaration_order() {
        let schema = Schema::from_json(POINT_JSON).unwrap();
        let names: Vec<_> = schema.properties.keys().cloned().collect();
        assert_eq!(names, vec!["x", "y", "tags"]);
    }

    #[test]
    fn unknown_type_string_fails_to_parse() {
        let json = r#"{"title":"T","properties":{"f":{"title":"f","type":"float64"}}}"#;
        assert!(Schema::from_json(json).is_err());
    }

    #[test]
    fn missing_properties_defaults_to_empty() {
        let schema = Schema::from_json(r#"{"title":"Empty"}"#).unwrap();
        assert!(schema.properties.is_empty());
    }

    #[test]
    fn json_round_trips() {
        let schema = Schema::from_json(POINT_JSON).unwrap();
        let rendered = schema.to_json().unwrap();
        let reparsed = Schema::from_json(&rendered).unwrap();
        assert_eq!(reparsed.title, "Point");
        let names: Vec<_> = reparsed.properties.keys().cloned().collect();
        assert_eq!(names, vec!["x", "y", "tags"]);
    }
}
