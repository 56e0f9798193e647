//! CLI module for the proxy generator
//!
//! This module provides the command-line interface for proxygen.
//!
//! ## Commands
//!
//! - `generate <dir>` - Generate a proxy for every interface file in a directory
//! - `emit <file>` - Print the proxy generated for a single file
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::{DEFAULT_INTERFACE_MODULE, DEFAULT_NAMESPACE, DEFAULT_POLICY_IMPORT, GeneratorConfig};
use crate::version::PROXYGEN_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Generate timeout-and-retry proxies for Rust service traits
#[derive(Parser, Debug)]
#[command(name = "proxygen")]
#[command(version = PROXYGEN_VERSION)]
#[command(about = "Generate timeout-and-retry proxies for Rust service traits", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a proxy for every interface file in a directory
    Generate {
        /// Directory containing interface source files
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        /// Output directory (default: <DIR>/proxy)
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,
        /// Skip files whose name contains PATTERN (repeatable)
        #[arg(long = "skip", value_name = "PATTERN")]
        skip: Vec<String>,
        /// Print generated code instead of writing files
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Print the proxy generated for a single file
    Emit {
        /// Interface source file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        generator: GeneratorArgs,
    },
}

/// Flags that shape the generated code.
#[derive(Args, Debug, Clone)]
pub struct GeneratorArgs {
    /// Module the generated proxy is placed in
    #[arg(long, value_name = "NS", default_value = DEFAULT_NAMESPACE)]
    pub namespace: String,
    /// `use` item that brings the resilience policy into scope
    #[arg(long, value_name = "USE", default_value = DEFAULT_POLICY_IMPORT)]
    pub policy_import: String,
    /// Path the interface files' modules are reachable under (e.g. `crate::services`)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_INTERFACE_MODULE)]
    pub interface_module: String,
}

impl GeneratorArgs {
    /// Build the generator configuration these flags describe.
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig::new()
            .with_namespace(self.namespace.as_str())
            .with_policy_import(self.policy_import.as_str())
            .with_interface_module(self.interface_module.as_str())
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            dir,
            out,
            skip,
            dry_run,
            generator,
        } => {
            let options = commands::GenerateOptions {
                out_dir: out,
                skip,
                dry_run,
                config: generator.config(),
            };
            commands::generate(&dir, &options)
        }
        Command::Emit { file, generator } => commands::emit_file(&file, &generator.config()),
    }
}

// ============================================================================
// Tests
// ============================================================================
