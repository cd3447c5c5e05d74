//! `recast generate` subcommand
//!
//! Reads a JSON record schema and emits a compilable Rust source file with
//! the record struct, its slot table, the event encoder, and (by default) a
//! seeded round-trip test module.
//!
//! # Usage
//!
//! ```text
//! recast generate --schema point.schema.json --out src/point.rs
//! recast generate --schema point.schema.json --out src/point.rs --check
//! recast generate --schema point.schema.json --out src/point.rs --dry-run
//! recast generate --schema point.schema.json --out src/point.rs --no-tests
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use colored::Colorize;

use recast_codegen::{generate_rust, generate_rust_with_tests};

use crate::commands::{load_schema, print_validation_results};
use crate::error::{CliError, CliResult};

/// Generate Rust source from a schema file
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Path to the schema JSON file
    #[arg(long)]
    pub schema: PathBuf,

    /// Output path for the generated Rust source
    #[arg(long)]
    pub out: PathBuf,

    /// Verify the output file is up to date without writing (exit 1 if stale)
    #[arg(long)]
    pub check: bool,

    /// Print generated output to stdout instead of writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the generated round-trip test module
    #[arg(long)]
    pub no_tests: bool,
}

impl GenerateCommand {
    pub fn execute(self) -> CliResult<()> {
        let schema = load_schema(&self.schema)?;

        if print_validation_results(&schema, &self.schema) {
            return Err(
                anyhow::anyhow!("validation failed — fix the errors above and retry").into(),
            );
        }

        let source = if self.no_tests {
            generate_rust(&schema)
        } else {
            generate_rust_with_tests(&schema)
        }
        .map_err(|e| CliError::invalid_schema(self.schema.display().to_string(), e))?;

        if self.check {
            let existing = std::fs::read_to_string(&self.out).ok();
            if existing.as_deref() != Some(source.as_str()) {
                return Err(CliError::OutOfDate {
                    path: self.out.display().to_string(),
                });
            }
            println!("{} {} is up to date", "✓".green(), self.out.display());
            return Ok(());
        }

        if self.dry_run {
            println!("{}  {}", "── Rust".dimmed(), self.out.display());
            println!("{source}");
            return Ok(());
        }

        write_if_changed(&self.out, &source)?;

        println!(
            "{} {} generated from {}",
            "✓".green(),
            schema.title,
            self.schema.display()
        );

        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Write `contents` to `path`, creating parent directories as needed.
/// Prints a status line indicating whether the file was written or unchanged.
fn write_if_changed(path: &Path, contents: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory: {}", parent.display()))?;
    }

    let existing = std::fs::read_to_string(path).ok();
    let changed = existing.as_deref() != Some(contents);

    if changed {
        std::fs::write(path, contents).with_context(|| format!("writing {}", path.display()))?;
        println!("  {} {} written", "→".cyan(), path.display());
    } else {
        println!("  {} {} unchanged", "·".dimmed(), path.display());
    }

    Ok(())
}
