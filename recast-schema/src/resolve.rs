//! Type resolver — schema types to host storage types
//!
//! Maps each [`PropertyDescriptor`] to a [`ResolvedType`]: a recursive
//! tagged variant (`Scalar` | `Sequence`) restricted to depth 1. The
//! recursive representation keeps the door open for deeper nesting, but
//! [`resolve`] enforces the supported shape — a sequence of sequences fails
//! generation rather than silently truncating or flattening.
//!
//! Pure functions, no state.

use recast_event::{ScalarKind, SlotKind};
use thiserror::Error;

use crate::schema::{PropertyDescriptor, PropertyType, Schema};

// ── Resolved types ───────────────────────────────────────────────────────────

/// Host storage type derived from a schema type descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Scalar(ScalarKind),
    Sequence(Box<ResolvedType>),
}

impl ResolvedType {
    pub fn is_sequence(&self) -> bool {
        matches!(self, ResolvedType::Sequence(_))
    }

    /// The slot kind this type occupies in a record's slot table.
    pub fn slot_kind(&self) -> SlotKind {
        match self {
            ResolvedType::Scalar(kind) => SlotKind::Scalar(*kind),
            ResolvedType::Sequence(element) => match element.as_ref() {
                ResolvedType::Scalar(kind) => SlotKind::Sequence(*kind),
                // resolve() rejects deeper nesting before a ResolvedType
                // escapes this module.
                ResolvedType::Sequence(_) => unreachable!("sequence nesting is capped at depth 1"),
            },
        }
    }
}

/// One resolved field of a record: name plus storage type. Invariant:
/// `ty.is_sequence()` implies the element type is scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedField {
    pub name: String,
    pub ty: ResolvedType,
}

// ── Errors ───────────────────────────────────────────────────────────────────

/// A schema type cannot be mapped to a host type. Compile-time and fatal:
/// generation aborts and nothing is emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("field '{field}': sequences of sequences are not supported")]
    UnsupportedNesting { field: String },

    #[error("field '{field}': array type requires an 'items' descriptor")]
    MissingItems { field: String },
}

// ── Resolution ───────────────────────────────────────────────────────────────

fn scalar_kind(property_type: PropertyType) -> Option<ScalarKind> {
    match property_type {
        PropertyType::Integer => Some(ScalarKind::Int),
        PropertyType::Number => Some(ScalarKind::Double),
        PropertyType::Boolean => Some(ScalarKind::Bool),
        PropertyType::String => Some(ScalarKind::Text),
        PropertyType::Array => None,
    }
}

/// Resolve one property descriptor. `field` names the property being
/// resolved, for diagnostics.
pub fn resolve(descriptor: &PropertyDescriptor, field: &str) -> Result<ResolvedType, ResolveError> {
    match descriptor.property_type {
        PropertyType::Array => {
            let items = descriptor
                .items
                .as_deref()
                .ok_or_else(|| ResolveError::MissingItems {
                    field: field.to_owned(),
                })?;
            match scalar_kind(items.property_type) {
                Some(kind) => Ok(ResolvedType::Sequence(Box::new(ResolvedType::Scalar(kind)))),
                None => Err(ResolveError::UnsupportedNesting {
                    field: field.to_owned(),
                }),
            }
        }
        other => match scalar_kind(other) {
            Some(kind) => Ok(ResolvedType::Scalar(kind)),
            None => unreachable!("array handled above"),
        },
    }
}

/// Resolve every property of a schema, in declaration order.
pub fn resolve_schema(schema: &Schema) -> Result<Vec<ResolvedField>, ResolveError> {
    schema
        .properties
        .values()
        .map(|descriptor| {
            let ty = resolve(descriptor, &descriptor.title)?;
            Ok(ResolvedField {
                name: descriptor.title.clone(),
                ty,
            })
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(title: &str, property_type: PropertyType) -> PropertyDescriptor {
        PropertyDescriptor {
            title: title.to_owned(),
            property_type,
            items: None,
        }
    }

    fn array_of(title: &str, element: PropertyType) -> PropertyDescriptor {
        PropertyDescriptor {
            title: title.to_owned(),
            property_type: PropertyType::Array,
            items: Some(Box::new(scalar("", element))),
        }
    }

    #[test]
    fn scalar_mapping_is_fixed() {
        let cases = [
            (PropertyType::Integer, ScalarKind::Int),
            (PropertyType::Number, ScalarKind::Double),
            (PropertyType::Boolean, ScalarKind::Bool),
            (PropertyType::String, ScalarKind::Text),
        ];
        for (property_type, expected) in cases {
            let resolved = resolve(&scalar("f", property_type), "f").unwrap();
            assert_eq!(resolved, ResolvedType::Scalar(expected));
        }
    }

    #[test]
    fn array_of_scalar_resolves_to_sequence() {
        let resolved = resolve(&array_of("tags", PropertyType::String), "tags").unwrap();
        assert!(resolved.is_sequence());
        assert_eq!(
            resolved.slot_kind(),
            SlotKind::Sequence(ScalarKind::Text)
        );
    }

    #[test]
    fn nested_array_rejected() {
        let descriptor = PropertyDescriptor {
            title: "grid".to_owned(),
            property_type: PropertyType::Array,
            items: Some(Box::new(array_of("", PropertyType::Integer))),
        };
        let err = resolve(&descriptor, "grid").unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnsupportedNesting {
                field: "grid".to_owned()
            }
        );
    }

    #[test]
    fn array_without_items_rejected() {
        let descriptor = PropertyDescriptor {
            title: "tags".to_owned(),
            property_type: PropertyType::Array,
            items: None,
        };
        let err = resolve(&descriptor, "tags").unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingItems {
                field: "tags".to_owned()
            }
        );
    }

    #[test]
    fn resolve_schema_preserves_declaration_order() {
        let json = r#"
        {
            "title": "Point",
            "properties": {
                "x": { "title": "x", "type": "integer" },
                "y": { "title": "y", "type": "integer" },
                "tags": { "title": "tags", "type": "array", "items": { "type": "string" } }
            }
        }
        "#;
        let schema = Schema::from_json(json).unwrap();
        let fields = resolve_schema(&schema).unwrap();
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "tags"]);
        assert_eq!(fields[0].ty, ResolvedType::Scalar(ScalarKind::Int));
        assert!(fields[2].ty.is_sequence());
    }
}
