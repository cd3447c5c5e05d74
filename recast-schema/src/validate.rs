//! Schema validator
//!
//! Checks a [`Schema`] for structural and semantic errors before code is
//! generated.

use crate::schema::{PropertyType, Schema};

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Human-readable description of the problem.
    pub message: String,
    /// Location in the schema that caused the error (e.g. `properties.tags`).
    pub location: String,
    /// Whether this blocks code generation (`Error`) or is advisory (`Warning`).
    pub severity: Severity,
}

/// Severity of a [`ValidationError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    /// Blocks code generation — generated code would be invalid or uncompilable.
    Error,
    /// Advisory — generated code may still work but behaviour could be unexpected.
    Warning,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self.severity {
            Severity::Error => "ERROR",
            Severity::Warning => "WARN",
        };
        write!(f, "[{}] {}: {}", tag, self.location, self.message)
    }
}

/// Reserved words that cannot name a generated field.
const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use",
    "where", "while",
];

/// Validate a [`Schema`] and return all problems found.
///
/// An empty `Vec` means the schema is valid and codegen may proceed.
/// Any entry with [`Severity::Error`] should block generation.
pub fn validate(schema: &Schema) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = Vec::new();

    validate_title(schema, &mut errors);
    validate_properties(schema, &mut errors);

    errors
}

/// Returns `true` if `validate()` produces no `Error`-severity issues.
pub fn is_valid(schema: &Schema) -> bool {
    !validate(schema)
        .iter()
        .any(|e| e.severity == Severity::Error)
}

// ── Internal validators ────────────────────────────────────────────────────────

fn validate_title(schema: &Schema, errors: &mut Vec<ValidationError>) {
    if schema.title.is_empty() {
        errors.push(ValidationError {
            message: "schema title must not be empty".to_string(),
            location: "title".to_string(),
            severity: Severity::Error,
        });
        return;
    }

    if !is_identifier(&schema.title) {
        errors.push(ValidationError {
            message: format!("schema title '{}' is not a valid identifier", schema.title),
            location: "title".to_string(),
            severity: Severity::Error,
        });
    }

    // PascalCase convention for the generated struct name
    if !schema
        .title
        .chars()
        .next()
        .map(|c| c.is_uppercase())
        .unwrap_or(false)
    {
        errors.push(ValidationError {
            message: format!(
                "schema title '{}' should start with an uppercase letter (PascalCase)",
                schema.title
            ),
            location: "title".to_string(),
            severity: Severity::Warning,
        });
    }
}

fn validate_properties(schema: &Schema, errors: &mut Vec<ValidationError>) {
    if schema.properties.is_empty() {
        errors.push(ValidationError {
            message: format!(
                "schema '{}' has no properties — the generated struct will be empty",
                schema.title
            ),
            location: "properties".to_string(),
            severity: Severity::Warning,
        });
    }

    let mut seen_titles: Vec<&str> = Vec::new();

    for (key, descriptor) in &schema.properties {
        let loc = format!("properties.{key}");

        if descriptor.title.is_empty() {
            errors.push(ValidationError {
                message: "property title must not be empty".to_string(),
                location: loc,
                severity: Severity::Error,
            });
            continue; // Can't do further checks without a name
        }

        // The field identifier and the wire key are the same name by design;
        // the map key is what decode-time lookups use, so they must agree.
        if descriptor.title != *key {
            errors.push(ValidationError {
                message: format!(
                    "property key '{}' and title '{}' must be identical",
                    key, descriptor.title
                ),
                location: loc.clone(),
                severity: Severity::Error,
            });
        }

        if !is_identifier(&descriptor.title) || RUST_KEYWORDS.contains(&descriptor.title.as_str()) {
            errors.push(ValidationError {
                message: format!(
                    "property title '{}' cannot be used as a field identifier",
                    descriptor.title
                ),
                location: loc.clone(),
                severity: Severity::Error,
            });
        }

        if seen_titles.contains(&descriptor.title.as_str()) {
            errors.push(ValidationError {
                message: format!("duplicate property title '{}'", descriptor.title),
                location: loc.clone(),
                severity: Severity::Error,
            });
        } else {
            seen_titles.push(&descriptor.title);
        }

        if descriptor.property_type == PropertyType::Array {
            match descriptor.items.as_deref() {
                None => {
                    errors.push(ValidationError {
                        message: "array property requires an 'items' descriptor".to_string(),
                        location: format!("{loc}.items"),
                        severity: Severity::Error,
                    });
                }
                Some(items) if items.property_type == PropertyType::Array => {
                    errors.push(ValidationError {
                        message: "sequences of sequences are not supported".to_string(),
                        location: format!("{loc}.items"),
                        severity: Severity::Error,
                    });
                }
                Some(_) => {}
            }
        } else if descriptor.items.is_some() {
            errors.push(ValidationError {
                message: "'items' is only meaningful for array properties; it will be ignored"
                    .to_string(),
                location: format!("{loc}.items"),
                severity: Severity::Warning,
            });
        }
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ── Tests ─────────────────────────────────────────────────────────────────────
