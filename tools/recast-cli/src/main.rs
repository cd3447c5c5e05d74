//! recast CLI - Command-line interface for the recast schema compiler
//!
//! This tool reads a JSON record schema and emits compilable Rust source
//! targeting the `recast-event` runtime, or validates the schema without
//! writing anything.

use clap::{Parser, Subcommand};
use commands::{check::CheckCommand, generate::GenerateCommand};

mod commands;
mod error;

/// recast - Compile record schemas into Rust structs and codecs
#[derive(Debug, Parser)]
#[command(name = "recast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate Rust source from a schema file
    #[command(name = "generate")]
    Generate(GenerateCommand),

    /// Validate a schema file without generating anything
    #[command(name = "check")]
    Check(CheckCommand),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(cmd) => cmd.execute(),
        Command::Check(cmd) => cmd.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
