//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::GeneratorConfig;
use crate::pipeline::{GeneratedProxy, ProxyError, proxy_for_source};

use super::{CliError, CliResult, ExitCode};

/// Directory name used for output when `--out` is not given.
pub const DEFAULT_OUT_DIR: &str = "proxy";

/// Maximum source file size (10 MB)
///
/// Interface files are small; anything larger is rejected before reading.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Options for [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Output directory (default: `<dir>/proxy`)
    pub out_dir: Option<PathBuf>,
    /// Files whose name contains any of these are skipped
    pub skip: Vec<String>,
    /// Print instead of writing
    pub dry_run: bool,
    pub config: GeneratorConfig,
}

impl GenerateOptions {
    fn out_dir_for(&self, dir: &Path) -> PathBuf {
        self.out_dir.clone().unwrap_or_else(|| dir.join(DEFAULT_OUT_DIR))
    }

    fn is_skipped(&self, file: &Path) -> bool {
        let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        self.skip.iter().any(|pattern| name.contains(pattern.as_str()))
    }
}

/// Outcome of a directory run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Proxies generated, with the path each was (or would be) written to
    pub generated: Vec<(PathBuf, GeneratedProxy)>,
    /// Files that failed to read, parse, or generate
    pub errors: usize,
}

/// Validate the output directory to prevent path traversal attacks.
fn validate_output_dir(out_dir: &Path) -> CliResult<()> {
    for component in out_dir.components() {
        if let std::path::Component::ParentDir = component {
            return Err(CliError::failure(format!(
                "Output directory '{}' contains path traversal (..)",
                out_dir.display()
            )));
        }
    }

    if out_dir.is_absolute() {
        tracing::debug!("Using absolute output path: {}", out_dir.display());
    }

    Ok(())
}

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (10 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

/// Render a pipeline error for the terminal, with source context for syntax errors.
fn render_error(err: ProxyError) -> String {
    format!("{:?}", miette::Report::new(err))
}

/// Run the pipeline for one file.
fn proxy_for_file(file_path: &Path, config: &GeneratorConfig) -> CliResult<Option<GeneratedProxy>> {
    tracing::info!("Reading {}", file_path.display());
    let source = read_source(file_path)?;
    proxy_for_source(&file_path.to_string_lossy(), &source, config).map_err(|e| CliError::failure(render_error(e)))
}

/// Collect `.rs` files directly inside `dir`, sorted by name.
fn collect_rs_files(dir: &Path) -> CliResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| CliError::failure(format!("Cannot read directory '{}': {}", dir.display(), e)))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "rs"))
        .collect();
    files.sort();
    Ok(files)
}

/// Generate proxies for every interface file in `dir`.
///
/// Files that fail are reported on stderr and counted; the remaining files are still processed.
pub fn generate_dir(dir: &Path, options: &GenerateOptions) -> CliResult<GenerateReport> {
    let out_dir = options.out_dir_for(dir);
    validate_output_dir(&out_dir)?;

    let files = collect_rs_files(dir)?;
    if files.is_empty() {
        return Err(CliError::failure(format!("No .rs files found in '{}'", dir.display())));
    }

    let mut report = GenerateReport::default();
    for file_path in files {
        if options.is_skipped(&file_path) {
            tracing::debug!("Skipping {}", file_path.display());
            continue;
        }

        let proxy = match proxy_for_file(&file_path, &options.config) {
            Ok(Some(proxy)) => proxy,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e.message);
                report.errors += 1;
                continue;
            }
        };

        tracing::info!("Generating proxy for {}", proxy.interface_name);
        let target = out_dir.join(proxy.file_name());

        if options.dry_run {
            println!("--- {}", target.display());
            print!("{}", proxy.code);
        } else {
            fs::create_dir_all(&out_dir).map_err(|e| {
                CliError::failure(format!("Error creating directory '{}': {}", out_dir.display(), e))
            })?;
            if let Err(e) = fs::write(&target, &proxy.code) {
                eprintln!("Error writing {}: {}", target.display(), e);
                report.errors += 1;
                continue;
            }
            tracing::info!("Wrote {}", target.display());
        }

        report.generated.push((target, proxy));
    }

    Ok(report)
}

/// `generate` command: run [`generate_dir`] and print a summary.
pub fn generate(dir: &Path, options: &GenerateOptions) -> CliResult<ExitCode> {
    let report = generate_dir(dir, options)?;

    let verb = if options.dry_run { "would be generated" } else { "generated" };
    println!("✓ {} proxy file(s) {}, {} error(s)", report.generated.len(), verb, report.errors);

    if report.errors > 0 {
        return Err(CliError::new("", ExitCode::FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}

/// `emit` command: print the proxy generated for one file.
pub fn emit_file(file_path: &Path, config: &GeneratorConfig) -> CliResult<ExitCode> {
    match proxy_for_file(file_path, config)? {
        Some(proxy) => {
            print!("{}", proxy.code);
            Ok(ExitCode::SUCCESS)
        }
        None => Err(CliError::failure(format!(
            "'{}' does not declare an interface (expected a trait inside an inline module)",
            file_path.display()
        ))),
    }
}
