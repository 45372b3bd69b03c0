#![forbid(unsafe_code)]

//! Text decoding with an ordered list of fallback encodings

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A strategy for turning file bytes into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Encoding {
    /// Strict UTF-8; fails on any invalid sequence
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    /// ISO-8859-1; every byte maps to one character, so it never fails
    #[serde(rename = "iso-8859-1", alias = "latin1")]
    Latin1,
}

impl Encoding {
    /// Strict UTF-8 first, then ISO-8859-1
    pub fn default_order() -> Vec<Encoding> {
        vec![Encoding::Utf8, Encoding::Latin1]
    }

    /// Decodes `bytes`, or returns `None` if they are invalid in this encoding
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_owned),
            Encoding::Latin1 => Some(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Canonical label
    pub fn label(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "iso-8859-1",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reads `path` as lines, trying each encoding in order
///
/// # Errors
///
/// Returns `ScanError::UnreadableFile` if the file cannot be read or no
/// encoding accepts its contents.
pub fn read_lines(path: &Path, encodings: &[Encoding]) -> Result<Vec<String>, ScanError> {
    let bytes = fs::read(path).map_err(|e| {
        tracing::debug!("Failed to read {}: {}", path.display(), e);
        ScanError::UnreadableFile {
            path: path.to_path_buf(),
        }
    })?;

    for (attempt, encoding) in encodings.iter().enumerate() {
        match encoding.decode(&bytes) {
            Some(text) => {
                if attempt > 0 {
                    tracing::debug!("Decoded {} as {}", path.display(), encoding);
                }
                return Ok(split_lines(&text).into_iter().map(str::to_owned).collect());
            }
            None => tracing::debug!("{} is not valid {}", path.display(), encoding),
        }
    }

    Err(ScanError::UnreadableFile {
        path: path.to_path_buf(),
    })
}

/// Splits text on `\n`, `\r\n` or a lone `\r`
///
/// A terminator at the very end does not produce a trailing empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }

    lines
}
