//! `recast check` subcommand
//!
//! Validates a schema file without generating anything. Exits nonzero when
//! validation reports errors; warnings are printed but do not fail the run.
//!
//! # Usage
//!
//! ```text
//! recast check --schema point.schema.json
//! ```

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::commands::{load_schema, print_validation_results};
use crate::error::CliResult;

/// Validate a schema file
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Path to the schema JSON file
    #[arg(long)]
    pub schema: PathBuf,
}

impl CheckCommand {
    pub fn execute(self) -> CliResult<()> {
        let schema = load_schema(&self.schema)?;

        if print_validation_results(&schema, &self.schema) {
            return Err(
                anyhow::anyhow!("validation failed — fix the errors above and retry").into(),
            );
        }

        println!(
            "{} {} validated successfully",
            "✓".green(),
            self.schema.display()
        );
        Ok(())
    }
}
