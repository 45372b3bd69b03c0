#![forbid(unsafe_code)]

//! forbidden-patterns: a build-time check for forbidden source patterns
//!
//! Files are scanned line by line against a registry of named regular
//! expressions. The registry always contains the mandatory `nocommit`,
//! mixed-case `nocommit` and `tab` rules; more can be registered before a
//! scan starts. A clean scan writes a marker file that build tooling can use
//! as a freshness signal.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod rules;
pub mod types;

// Re-export error types for convenient access
pub use error::{ConfigError, ForbiddenPatternsError, ScanError};

// Re-export the engine entry points
pub use engine::{Encoding, FileFilter, Marker, ScanResult, Scanner};
pub use rules::{RuleRecord, RuleRegistry};

// Re-export core domain types for convenient access
pub use types::{GlobPattern, RelativePath, Violation};
