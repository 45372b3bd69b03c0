//! File discovery with gitignore support
//!
//! This module lists candidate files for the scanner. It only decides what
//! exists on disk; which of those files are scanned is up to the
//! `FileFilter` applied by the scanner.

use crate::types::GlobPattern;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during file walking
#[derive(Debug, Error)]
pub enum FileWalkerError {
    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        source: globset::Error,
    },

    #[error("Walk error: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Path does not exist: {}", .0.display())]
    Missing(PathBuf),
}

/// Iterator over discovered files
pub struct FileWalker {
    walker: ignore::Walk,
    exclude_set: GlobSet,
}

impl FileWalker {
    /// Creates a new FileWalker
    ///
    /// # Arguments
    /// * `root` - Directory (or single file) to walk
    /// * `exclude` - Patterns whose matches are never listed; `.git`
    ///   directories are always skipped
    pub fn new(root: &Path, exclude: &[GlobPattern]) -> Result<Self, FileWalkerError> {
        if !root.exists() {
            return Err(FileWalkerError::Missing(root.to_path_buf()));
        }

        let walker = WalkBuilder::new(root)
            .hidden(false) // Don't skip hidden files by default
            .git_ignore(true) // Respect .gitignore
            .build();

        let mut exclude_patterns = Vec::from(exclude);
        exclude_patterns.push(GlobPattern::new("**/.git/**"));

        Ok(Self {
            walker,
            exclude_set: Self::build_globset(&exclude_patterns)?,
        })
    }

    /// Builds a GlobSet from patterns
    fn build_globset(patterns: &[GlobPattern]) -> Result<GlobSet, FileWalkerError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern.as_str()).map_err(|e| FileWalkerError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|e| FileWalkerError::InvalidGlob {
            pattern: "<globset>".to_string(),
            source: e,
        })
    }

    /// Walks the directory tree and returns an iterator over regular files
    pub fn walk(self) -> impl Iterator<Item = Result<PathBuf, FileWalkerError>> {
        let exclude_set = self.exclude_set;

        self.walker.filter_map(move |result| match result {
            Ok(entry) => {
                if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                    return None;
                }
                let path = entry.path();
                if exclude_set.is_match(path) {
                    return None;
                }
                Some(Ok(path.to_path_buf()))
            }
            Err(e) => Some(Err(FileWalkerError::Walk(e))),
        })
    }
}

/// Lists every file under `paths`, sorted and without duplicates
///
/// # Errors
///
/// Returns `FileWalkerError` if a path is missing or cannot be walked.
pub fn discover_files(
    paths: &[PathBuf],
    exclude: &[GlobPattern],
) -> Result<Vec<PathBuf>, FileWalkerError> {
    let mut files = BTreeSet::new();
    for path in paths {
        for file in FileWalker::new(path, exclude)?.walk() {
            files.insert(file?);
        }
    }
    tracing::debug!("Discovered {} files", files.len());
    Ok(files.into_iter().collect())
}
