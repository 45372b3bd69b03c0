#![forbid(unsafe_code)]

//! Include/exclude glob filtering of candidate files
//!
//! Known binary formats are always excluded. Excludes are checked after
//! includes, so an excluded file is never scanned.

use crate::error::ConfigError;
use crate::types::GlobPattern;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Include pattern used when none is configured
pub const DEFAULT_INCLUDE: &str = "**";

/// Binary file types that are never decoded as text
pub const BINARY_EXCLUDES: &[&str] = &[
    "**/*.gz",
    "**/*.ico",
    "**/*.jar",
    "**/*.zip",
    "**/*.jks",
    "**/*.crt",
    "**/*.png",
];

/// Decides which files are scanned
#[derive(Debug, Clone)]
pub struct FileFilter {
    includes: Vec<GlobPattern>,
    excludes: Vec<GlobPattern>,
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileFilter {
    /// Creates a filter that includes everything except the binary excludes
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlob` only if a built-in glob fails to compile.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_patterns(&[GlobPattern::new(DEFAULT_INCLUDE)], &[])
    }

    /// Creates a filter from include patterns and extra exclude patterns
    ///
    /// `extra_excludes` are appended to the binary excludes. An empty
    /// `includes` slice means include everything.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlob` if any pattern is invalid.
    pub fn with_patterns(
        includes: &[GlobPattern],
        extra_excludes: &[GlobPattern],
    ) -> Result<Self, ConfigError> {
        let includes = if includes.is_empty() {
            vec![GlobPattern::new(DEFAULT_INCLUDE)]
        } else {
            includes.to_vec()
        };

        let excludes: Vec<GlobPattern> = BINARY_EXCLUDES
            .iter()
            .map(|&p| GlobPattern::new(p))
            .chain(extra_excludes.iter().cloned())
            .collect();

        Ok(Self {
            include_set: build_globset(&includes)?,
            exclude_set: build_globset(&excludes)?,
            includes,
            excludes,
        })
    }

    /// Appends exclude patterns, keeping every existing one
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidGlob` if any pattern is invalid; the
    /// filter is unchanged in that case.
    pub fn exclude(&mut self, patterns: &[GlobPattern]) -> Result<(), ConfigError> {
        let mut excludes = self.excludes.clone();
        excludes.extend(patterns.iter().cloned());
        self.exclude_set = build_globset(&excludes)?;
        self.excludes = excludes;
        Ok(())
    }

    /// Whether `path` should be scanned
    ///
    /// `path` is expected to be relative to the project root.
    pub fn is_included(&self, path: &Path) -> bool {
        self.include_set.is_match(path) && !self.exclude_set.is_match(path)
    }

    /// Active include patterns
    pub fn includes(&self) -> &[GlobPattern] {
        &self.includes
    }

    /// Active exclude patterns, binary excludes first
    pub fn excludes(&self) -> &[GlobPattern] {
        &self.excludes
    }
}

/// Build a GlobSet from patterns
fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern.as_str()).map_err(|e| ConfigError::InvalidGlob {
            pattern: pattern.as_str().to_string(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ConfigError::InvalidGlob {
        pattern: "<globset>".to_string(),
        source: e,
    })
}
