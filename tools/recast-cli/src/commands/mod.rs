//! CLI subcommand implementations

pub mod check;
pub mod generate;

use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use recast_schema::{validate, Schema, Severity};

use crate::error::{CliError, CliResult};

/// Load and parse a schema file, mapping failures to CLI errors.
pub fn load_schema(path: &Path) -> CliResult<Schema> {
    if !path.exists() {
        return Err(CliError::schema_not_found(path.display().to_string()));
    }

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;

    Schema::from_json(&json)
        .map_err(|e| CliError::invalid_schema(path.display().to_string(), e))
}

/// Print validation results and return `true` if any errors were found.
pub fn print_validation_results(schema: &Schema, schema_path: &Path) -> bool {
    let errors = validate(schema);
    let mut has_errors = false;
    for e in &errors {
        match e.severity {
            Severity::Error => {
                eprintln!("{} [{}] {}", "✗".red(), e.location, e.message);
                has_errors = true;
            }
            Severity::Warning => {
                eprintln!("{} [{}] {}", "!".yellow(), e.location, e.message);
            }
        }
    }
    if !errors.is_empty() {
        eprintln!("  in: {}", schema_path.display());
    }
    has_errors
}
