//! recast-schema — schema model, type resolver, and validation
//!
//! Parses a JSON-Schema-shaped record description and resolves it into the
//! field layout the code generator consumes:
//!
//! - **[`Schema`]** — title plus insertion-ordered property map
//! - **[`resolve_schema`]** — maps schema types to host storage types
//!   (`integer → i32`, `number → f64`, `boolean → bool`, `string → String`,
//!   `array → Vec<element>`, one nesting level only)
//! - **[`validate`]** — structural checks before generation
//!
//! # Usage
//!
//! ```rust
//! use recast_schema::{resolve_schema, validate, Schema, Severity};
//!
//! let json = r#"
//! {
//!     "title": "Point",
//!     "properties": {
//!         "x": { "title": "x", "type": "integer" },
//!         "tags": { "title": "tags", "type": "array", "items": { "type": "string" } }
//!     }
//! }
//! "#;
//!
//! let schema = Schema::from_json(json).unwrap();
//!
//! let errors = validate(&schema);
//! assert!(errors.iter().all(|e| e.severity != Severity::Error));
//!
//! let fields = resolve_schema(&schema).unwrap();
//! assert_eq!(fields.len(), 2);
//! assert!(fields[1].ty.is_sequence());
//! ```

pub mod error;
pub mod resolve;
pub mod schema;
pub mod validate;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use error::SchemaError;
pub use resolve::{resolve, resolve_schema, ResolveError, ResolvedField, ResolvedType};
pub use schema::{PropertyDescriptor, PropertyType, Schema};
pub use validate::{is_valid, validate, Severity, ValidationError};

// Re-exported so downstream crates name kinds without a direct
// recast-event dependency.
pub use recast_event::{ScalarKind, SlotKind};
