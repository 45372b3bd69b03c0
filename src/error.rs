//! Error types for forbidden-patterns
//!
//! Configuration problems, scan failures and pattern violations are kept
//! apart so callers can tell a misconfigured check from a failing one.

use crate::types::Violation;
use std::path::PathBuf;

/// Configuration-time errors
///
/// Every variant is reported before any file is read.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A rule record lacks a required field, or the field is empty
    #[error("Missing [{0}] for forbidden pattern rule")]
    MissingField(&'static str),

    /// A rule record carries keys other than `name` and `pattern`
    #[error("unknown argument {}", .0.join(", "))]
    UnknownArgument(Vec<String>),

    /// A rule pattern does not compile
    #[error("Invalid regex pattern for rule [{name}]: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: Box<regex::Error>,
    },

    /// A rule pattern spans more than one line
    #[error("Pattern for rule [{0}] contains a newline; matching is line based")]
    MultilinePattern(String),

    /// A glob does not compile
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// Invalid configuration value
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Configuration file is not valid TOML or has unknown keys
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that abort a scan
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// No decoding strategy could read the file
    #[error("Unable to read lines from source file: {}", path.display())]
    UnreadableFile { path: PathBuf },

    /// The combined pattern could not be built
    #[error("Failed to compile combined pattern: {0}")]
    CombinedPattern(#[source] Box<regex::Error>),

    /// The success marker could not be written or cleared
    #[error("Failed to update marker {}: {source}", path.display())]
    Marker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level error type for forbidden-patterns
#[derive(Debug, thiserror::Error)]
pub enum ForbiddenPatternsError {
    /// Misconfigured rule, filter or configuration file
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The scan could not complete
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// File discovery failed
    #[error("File discovery error: {0}")]
    Discovery(#[from] crate::engine::file_walker::FileWalkerError),

    /// One or more forbidden patterns were found
    #[error("{}", format_violations(.violations))]
    PatternViolation { violations: Vec<Violation> },
}

impl ForbiddenPatternsError {
    /// Returns the violations carried by a `PatternViolation`, if any
    pub fn violations(&self) -> Option<&[Violation]> {
        match self {
            ForbiddenPatternsError::PatternViolation { violations } => Some(violations),
            _ => None,
        }
    }
}

/// Renders the aggregated failure message for a set of violations
pub fn format_violations(violations: &[Violation]) -> String {
    let lines: Vec<String> = violations.iter().map(ToString::to_string).collect();
    format!("Found invalid patterns:\n{}", lines.join("\n"))
}
