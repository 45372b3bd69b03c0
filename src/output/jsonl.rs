#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line:
//! 1. One violation record per violation, in report order
//! 2. One status record

use crate::engine::ScanResult;
use serde::Serialize;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    /// Creates a new JsonlFormatter
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Format the scan result as JSONL
    pub fn format(&self, result: &ScanResult) -> String {
        let mut output = String::new();

        for violation in result.violations() {
            let record = ViolationRecord {
                record_type: "violation",
                rule: &violation.rule_name,
                file: violation.file_path.as_str(),
                line: violation.line_number,
                message: violation.to_string(),
            };
            if let Ok(json) = serde_json::to_string(&record) {
                output.push_str(&json);
                output.push('\n');
            }
        }

        let status = StatusRecord {
            record_type: "status",
            passed: result.is_success(),
            files_scanned: result.files_scanned(),
            total_violations: result.violations().len(),
        };
        if let Ok(json) = serde_json::to_string(&status) {
            output.push_str(&json);
            output.push('\n');
        }

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Violation record for JSONL output
#[derive(Debug, Serialize)]
struct ViolationRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    rule: &'a str,
    file: &'a str,
    line: usize,
    message: String,
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_scanned: usize,
    total_violations: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RelativePath, Violation};
    use serde_json::Value;

    fn parse_lines(output: &str) -> Vec<Value> {
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_success_emits_only_status() {
        let output = JsonlFormatter::new().format(&ScanResult::Success { files_scanned: 4 });
        let records = parse_lines(&output);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "status");
        assert_eq!(records[0]["passed"], true);
        assert_eq!(records[0]["files_scanned"], 4);
        assert_eq!(records[0]["total_violations"], 0);
    }

    #[test]
    fn test_failure_emits_violations_then_status() {
        let result = ScanResult::Failure {
            violations: vec![
                Violation::new("nocommit", RelativePath::new("src/Foo.txt"), 3),
                Violation::new("tab", RelativePath::new("src/Foo.txt"), 7),
            ],
            files_scanned: 1,
        };
        let records = parse_lines(&JsonlFormatter::new().format(&result));

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["type"], "violation");
        assert_eq!(records[0]["rule"], "nocommit");
        assert_eq!(records[0]["file"], "src/Foo.txt");
        assert_eq!(records[0]["line"], 3);
        assert_eq!(records[0]["message"], "- nocommit on line 3 of src/Foo.txt");
        assert_eq!(records[1]["rule"], "tab");
        assert_eq!(records[2]["type"], "status");
        assert_eq!(records[2]["passed"], false);
        assert_eq!(records[2]["total_violations"], 2);
    }
}
