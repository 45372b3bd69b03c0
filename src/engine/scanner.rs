#![forbid(unsafe_code)]

//! Pattern scanner
//!
//! This module provides the Scanner, which applies a frozen rule set to a
//! batch of candidate files. Files are decoded and matched in parallel using
//! rayon; violations are reported in input order, then by line, then by rule
//! name.

use crate::engine::decoder::{Encoding, read_lines};
use crate::engine::file_filter::FileFilter;
use crate::engine::marker::Marker;
use crate::error::{ForbiddenPatternsError, ScanError};
use crate::rules::{LineMatcher, RuleRegistry};
use crate::types::{RelativePath, Violation};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Default build output directory, relative to the project root
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Outcome of a completed scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanResult {
    /// No violations; the marker has been written
    Success {
        /// Number of files that passed the filter and were scanned
        files_scanned: usize,
    },
    /// At least one violation; the marker is absent
    Failure {
        /// Every violation found, in report order
        violations: Vec<Violation>,
        /// Number of files that passed the filter and were scanned
        files_scanned: usize,
    },
}

impl ScanResult {
    /// Whether the scan found nothing
    pub fn is_success(&self) -> bool {
        matches!(self, ScanResult::Success { .. })
    }

    /// Violations found (empty on success)
    pub fn violations(&self) -> &[Violation] {
        match self {
            ScanResult::Success { .. } => &[],
            ScanResult::Failure { violations, .. } => violations,
        }
    }

    /// Number of files scanned
    pub fn files_scanned(&self) -> usize {
        match self {
            ScanResult::Success { files_scanned } | ScanResult::Failure { files_scanned, .. } => {
                *files_scanned
            }
        }
    }
}

/// Scanner that owns a frozen rule set
///
/// The registry is consumed on construction, so rules cannot change while
/// files are being scanned.
pub struct Scanner {
    matcher: Box<dyn LineMatcher>,
    rule_count: usize,
    filter: FileFilter,
    project_root: PathBuf,
    encodings: Vec<Encoding>,
    marker: Marker,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("matcher", &"<LineMatcher>")
            .field("rule_count", &self.rule_count)
            .field("filter", &self.filter)
            .field("project_root", &self.project_root)
            .field("encodings", &self.encodings)
            .field("marker", &self.marker)
            .finish()
    }
}

impl Scanner {
    /// Creates a scanner from a registry
    ///
    /// The marker defaults to `<project_root>/build/markers/forbiddenPatterns`
    /// and decoding to strict UTF-8 with an ISO-8859-1 fallback.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::CombinedPattern` if the combined matcher cannot be built.
    pub fn new(
        registry: RuleRegistry,
        filter: FileFilter,
        project_root: impl Into<PathBuf>,
    ) -> Result<Self, ScanError> {
        let rule_count = registry.len();
        let matcher = registry.combined_matcher()?;
        Ok(Self::with_matcher(Box::new(matcher), rule_count, filter, project_root))
    }

    /// Creates a scanner around any matcher implementation
    pub fn with_matcher(
        matcher: Box<dyn LineMatcher>,
        rule_count: usize,
        filter: FileFilter,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        let project_root = project_root.into();
        let marker = Marker::in_build_dir(&project_root.join(DEFAULT_BUILD_DIR));
        Self {
            matcher,
            rule_count,
            filter,
            project_root,
            encodings: Encoding::default_order(),
            marker,
        }
    }

    /// Overrides the marker location
    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    /// Overrides the ordered list of decoding strategies
    pub fn with_encodings(mut self, encodings: Vec<Encoding>) -> Self {
        self.encodings = encodings;
        self
    }

    /// The marker written on success
    pub fn marker(&self) -> &Marker {
        &self.marker
    }

    /// Number of rules applied to every line
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Scan a batch of files
    ///
    /// Files rejected by the filter are skipped. The marker is written only
    /// when no file has a violation; otherwise any previous marker is removed.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::UnreadableFile` if any file cannot be decoded, and
    /// `ScanError::Marker` if the marker cannot be updated. No partial result
    /// is produced in either case.
    pub fn scan(&self, files: &[PathBuf]) -> Result<ScanResult, ScanError> {
        // The marker is identified while it still exists on disk
        let marker_relative = RelativePath::relative_to(self.marker.path(), &self.project_root);
        let marker_canonical = self.marker.path().canonicalize().ok();

        let candidates: Vec<(&Path, RelativePath)> = files
            .iter()
            .filter_map(|file| {
                let relative = RelativePath::relative_to(file, &self.project_root);
                if relative == marker_relative || is_same_file(file, marker_canonical.as_deref()) {
                    return None;
                }
                if Path::new(relative.as_str()).is_absolute() {
                    tracing::warn!("{} is outside the project root", relative);
                }
                if self.filter.is_included(Path::new(relative.as_str())) {
                    Some((file.as_path(), relative))
                } else {
                    tracing::debug!("Skipping {} (excluded by filter)", relative);
                    None
                }
            })
            .collect();

        self.marker.clear()?;

        let files_scanned = candidates.len();
        if candidates.is_empty() {
            tracing::info!("No files to check");
            self.marker.write()?;
            return Ok(ScanResult::Success { files_scanned });
        }

        tracing::info!(
            "Checking {} files with {} rules",
            files_scanned,
            self.rule_count
        );

        let per_file: Vec<Vec<Violation>> = candidates
            .par_iter()
            .map(|(path, relative)| self.scan_file(path, relative))
            .collect::<Result<_, _>>()?;

        let violations: Vec<Violation> = per_file.into_iter().flatten().collect();

        if violations.is_empty() {
            self.marker.write()?;
            Ok(ScanResult::Success { files_scanned })
        } else {
            tracing::info!("Found {} forbidden pattern occurrences", violations.len());
            Ok(ScanResult::Failure {
                violations,
                files_scanned,
            })
        }
    }

    /// Scan a batch of files, turning violations into an error
    ///
    /// Returns the number of files scanned on success.
    ///
    /// # Errors
    ///
    /// Returns `ForbiddenPatternsError::PatternViolation` carrying every
    /// violation, or `ForbiddenPatternsError::Scan` if the scan aborted.
    pub fn check(&self, files: &[PathBuf]) -> Result<usize, ForbiddenPatternsError> {
        match self.scan(files)? {
            ScanResult::Success { files_scanned } => Ok(files_scanned),
            ScanResult::Failure { violations, .. } => {
                Err(ForbiddenPatternsError::PatternViolation { violations })
            }
        }
    }

    /// Decode and match one file
    fn scan_file(&self, path: &Path, relative: &RelativePath) -> Result<Vec<Violation>, ScanError> {
        tracing::debug!("Scanning {}", relative);
        let lines = read_lines(path, &self.encodings)?;
        Ok(self.scan_lines(&lines, relative))
    }

    /// Attribute every matching line to the rules responsible
    pub fn scan_lines<S: AsRef<str>>(&self, lines: &[S], relative: &RelativePath) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if !self.matcher.is_match(line) {
                continue;
            }
            for rule in self.matcher.matching_rules(line) {
                violations.push(Violation::new(rule, relative.clone(), index + 1));
            }
        }
        violations
    }
}

/// Whether `file` resolves to `canonical`; only same-named files are resolved
fn is_same_file(file: &Path, canonical: Option<&Path>) -> bool {
    canonical.is_some_and(|target| {
        file.file_name() == target.file_name()
            && file.canonicalize().is_ok_and(|resolved| resolved == target)
    })
}
