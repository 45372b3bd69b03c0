#![forbid(unsafe_code)]

//! Success marker consumed by build tooling as a freshness signal

use crate::error::ScanError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Content written to the marker on success
pub const MARKER_TOKEN: &str = "done";

/// Location of the marker below the build output directory
pub const MARKER_RELATIVE_PATH: &str = "markers/forbiddenPatterns";

/// The marker file written after a clean scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    path: PathBuf,
}

impl Marker {
    /// Marker at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Marker at `<build_dir>/markers/forbiddenPatterns`
    pub fn in_build_dir(build_dir: &Path) -> Self {
        Self::new(build_dir.join(MARKER_RELATIVE_PATH))
    }

    /// Path of the marker file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the success token, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Marker` on any I/O failure.
    pub fn write(&self) -> Result<(), ScanError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.error(e))?;
        }
        fs::write(&self.path, MARKER_TOKEN).map_err(|e| self.error(e))
    }

    /// Removes a marker left by an earlier clean run
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Marker` if an existing marker cannot be removed.
    pub fn clear(&self) -> Result<(), ScanError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed stale marker {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.error(e)),
        }
    }

    fn error(&self, source: std::io::Error) -> ScanError {
        ScanError::Marker {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let marker = Marker::in_build_dir(&dir.path().join("build"));
        marker.write().unwrap();

        let content = fs::read_to_string(dir.path().join("build/markers/forbiddenPatterns")).unwrap();
        assert_eq!(content, "done");
    }

    #[test]
    fn test_write_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let marker = Marker::new(dir.path().join("marker"));
        fs::write(marker.path(), "stale contents").unwrap();

        marker.write().unwrap();
        marker.write().unwrap();
        assert_eq!(fs::read_to_string(marker.path()).unwrap(), MARKER_TOKEN);
    }

    #[test]
    fn test_clear_removes_and_tolerates_missing() {
        let dir = TempDir::new().unwrap();
        let marker = Marker::new(dir.path().join("marker"));
        marker.clear().unwrap();

        marker.write().unwrap();
        marker.clear().unwrap();
        assert!(!marker.path().exists());
    }
}
