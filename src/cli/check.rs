//! Check command implementation
//!
//! This module implements the `forbidden-patterns check` command, which:
//! - Loads configuration from forbidden-patterns.toml
//! - Registers configured and command-line rules on top of the mandatory ones
//! - Discovers files to check
//! - Scans them and writes the success marker when clean
//! - Formats output (human or JSONL)
//! - Returns appropriate exit code

use crate::cli::args::{ColorChoice, OutputFormat, RuleOptions};
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS, build_registry, load_config};
use crate::engine::file_walker::discover_files;
use crate::engine::{FileFilter, Marker, ScanResult, Scanner};
use crate::error::ForbiddenPatternsError;
use crate::output::{HumanFormatter, JsonlFormatter};
use crate::types::{GlobPattern, RelativePath};
use std::path::{Path, PathBuf};
use termcolor::StandardStream;

/// Everything the check command needs
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Files or directories to check; empty means the project root
    pub paths: Vec<PathBuf>,
    /// Root, configuration file and extra rules
    pub rules: RuleOptions,
    /// Extra exclude globs
    pub excludes: Vec<String>,
    /// Explicit marker location
    pub marker: Option<PathBuf>,
    /// Output format
    pub format: OutputFormat,
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: Success (no forbidden pattern found, marker written)
/// - 1: One or more forbidden patterns found
/// - 2: Error (configuration, unreadable file, I/O)
pub fn run_check(options: &CheckOptions, color: ColorChoice) -> i32 {
    match check_project(options) {
        Ok(result) => {
            report(&result, options.format, color);
            if result.is_success() {
                EXIT_SUCCESS
            } else {
                EXIT_VIOLATIONS
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Run a check and return the scan result without reporting it
///
/// # Errors
///
/// Returns `ForbiddenPatternsError` for configuration, discovery or scan
/// failures. Violations are part of the returned `ScanResult`.
pub fn check_project(options: &CheckOptions) -> Result<ScanResult, ForbiddenPatternsError> {
    let root = &options.rules.root;

    // 1. Configuration and rules; any mistake surfaces before file I/O
    let config = load_config(&options.rules)?;
    let registry = build_registry(&config, &options.rules)?;

    // 2. File filter: configured excludes, then command-line excludes
    let excludes: Vec<GlobPattern> = config
        .check
        .exclude
        .iter()
        .cloned()
        .chain(options.excludes.iter().map(|e| GlobPattern::new(e.as_str())))
        .collect();
    let filter = FileFilter::with_patterns(&config.check.include, &excludes)?;

    // 3. Discover files, leaving build output alone
    let build_dir = root.join(&config.check.build_dir);
    let paths = if options.paths.is_empty() {
        vec![root.clone()]
    } else {
        options.paths.clone()
    };
    let build_relative = RelativePath::relative_to(&build_dir, root);
    let mut files = discover_files(&paths, &[])?;
    files.retain(|file| !is_within(file, root, &build_relative));

    // 4. Scan
    let marker = options
        .marker
        .clone()
        .map(Marker::new)
        .unwrap_or_else(|| Marker::in_build_dir(&build_dir));
    let scanner = Scanner::new(registry, filter, root.clone())?
        .with_marker(marker)
        .with_encodings(config.check.encodings.clone());

    Ok(scanner.scan(&files)?)
}

/// Whether `file` lies below `dir`, both compared relative to `root`
fn is_within(file: &Path, root: &Path, dir: &RelativePath) -> bool {
    let relative = RelativePath::relative_to(file, root);
    Path::new(relative.as_str()).starts_with(dir.as_str())
}

/// Print the result in the requested format
fn report(result: &ScanResult, format: OutputFormat, color: ColorChoice) {
    match format {
        OutputFormat::Human => {
            let mut stderr = StandardStream::stderr(color.into());
            if let Err(e) = HumanFormatter::new().write(result, &mut stderr) {
                tracing::warn!("Failed to write report: {}", e);
            }
        }
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format(result)),
    }
}
