#![forbid(unsafe_code)]

//! Core domain types for forbidden-patterns
//!
//! This module defines the fundamental types shared by the rule registry,
//! the scanner and the output formatters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A project-relative display path
///
/// Paths are normalized to use forward slashes, have no leading "./" and no
/// trailing slash. Violation messages always use this form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RelativePath(String);

impl RelativePath {
    /// Creates a new RelativePath with normalization
    pub fn new(path: impl Into<String>) -> Self {
        RelativePath(Self::normalize(path.into()))
    }

    /// Computes the display path of `file` relative to `root`
    ///
    /// Falls back to canonicalized paths when the lexical prefix does not
    /// match (e.g. `file` is relative to the current directory while `root`
    /// is absolute). Files outside the root keep their full path.
    pub fn relative_to(file: &Path, root: &Path) -> Self {
        if let Some(rel) = Self::strip_root(file, root) {
            return rel;
        }

        if let (Ok(file), Ok(root)) = (file.canonicalize(), root.canonicalize())
            && let Some(rel) = Self::strip_root(&file, &root)
        {
            return rel;
        }

        Self::from_path(file)
    }

    fn strip_root(file: &Path, root: &Path) -> Option<Self> {
        file.strip_prefix(root).ok().map(Self::from_path)
    }

    fn from_path(path: &Path) -> Self {
        let cleaned: PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect();
        Self::new(cleaned.to_string_lossy().into_owned())
    }

    /// Normalizes a path:
    /// - Convert backslashes to forward slashes
    /// - Remove trailing slashes
    /// - Remove "./" prefixes
    fn normalize(mut path: String) -> String {
        path = path.replace('\\', "/");

        while path.ends_with('/') && path.len() > 1 {
            path.pop();
        }

        while let Some(stripped) = path.strip_prefix("./") {
            path = stripped.to_string();
        }

        if path.is_empty() {
            return ".".to_string();
        }

        path
    }

    /// Returns the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RelativePath {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Ok(RelativePath::new(value))
    }
}

impl From<RelativePath> for String {
    fn from(path: RelativePath) -> Self {
        path.0
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for GlobPattern {
    fn from(pattern: String) -> Self {
        GlobPattern(pattern)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}

/// One forbidden pattern occurrence: a (rule, file, line) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the rule whose pattern matched
    pub rule_name: String,

    /// File path relative to the project root
    pub file_path: RelativePath,

    /// Line number (1-indexed)
    pub line_number: usize,
}

impl Violation {
    /// Creates a new Violation
    pub fn new(rule_name: impl Into<String>, file_path: RelativePath, line_number: usize) -> Self {
        Self {
            rule_name: rule_name.into(),
            file_path,
            line_number,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- {} on line {} of {}",
            self.rule_name, self.line_number, self.file_path
        )
    }
}
