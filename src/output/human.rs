#![forbid(unsafe_code)]

//! Human-readable output
//!
//! Violations are printed exactly as the aggregated failure message reads,
//! with the heading highlighted when color is enabled.

use crate::engine::ScanResult;
use std::io;
use termcolor::{Color, ColorSpec, WriteColor};

/// Heading printed above the violation list
pub const FAILURE_HEADING: &str = "Found invalid patterns:";

/// Human-readable formatter writing to any color-capable sink
pub struct HumanFormatter;

impl HumanFormatter {
    /// Creates a new HumanFormatter
    pub fn new() -> Self {
        HumanFormatter
    }

    /// Write the report for `result` to `out`
    pub fn write(&self, result: &ScanResult, out: &mut dyn WriteColor) -> io::Result<()> {
        if result.is_success() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
            write!(out, "No forbidden patterns found")?;
            out.reset()?;
            writeln!(out, " ({} files checked)", result.files_scanned())?;
            return Ok(());
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(out, "{FAILURE_HEADING}")?;
        out.reset()?;
        for violation in result.violations() {
            writeln!(out, "{violation}")?;
        }
        Ok(())
    }

    /// Render the report as plain text
    ///
    /// # Errors
    ///
    /// Propagates any error from `write`.
    pub fn format(&self, result: &ScanResult) -> io::Result<String> {
        let mut buffer = termcolor::NoColor::new(Vec::new());
        self.write(result, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer.into_inner()).into_owned())
    }
}

impl Default for HumanFormatter {
    fn default() -> Self {
        Self::new()
    }
}
