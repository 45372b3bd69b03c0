#![forbid(unsafe_code)]

//! Line matchers built from a frozen rule set
//!
//! The scanner only needs two questions answered per line: does anything
//! match, and which rules match. `LineMatcher` hides how that is computed.

use crate::error::ScanError;
use crate::rules::Rule;
use regex::Regex;

/// Answers per-line match questions for a fixed set of rules
pub trait LineMatcher: Send + Sync {
    /// Whether any rule matches `line`
    fn is_match(&self, line: &str) -> bool;

    /// Names of every rule matching `line`, in registry order
    fn matching_rules(&self, line: &str) -> Vec<&str>;
}

/// Matches with one alternation of all patterns, `(p1)|(p2)|...`, and
/// re-tests the individual rules only on lines the alternation flags.
#[derive(Debug)]
pub struct AlternationMatcher {
    combined: Option<Regex>,
    rules: Vec<Rule>,
}

impl AlternationMatcher {
    /// Builds the combined alternation over `rules`
    ///
    /// # Errors
    ///
    /// Returns `ScanError::CombinedPattern` if the joined pattern exceeds the
    /// regex engine's limits. Individual patterns are already validated.
    pub fn new(rules: Vec<Rule>) -> Result<Self, ScanError> {
        let combined = if rules.is_empty() {
            None
        } else {
            let joined = rules
                .iter()
                .map(|rule| format!("({})", rule.pattern()))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&joined).map_err(|e| ScanError::CombinedPattern(Box::new(e)))?)
        };

        Ok(Self { combined, rules })
    }

    /// Source text of the combined pattern, if any rules exist
    pub fn combined_pattern(&self) -> Option<&str> {
        self.combined.as_ref().map(Regex::as_str)
    }
}

impl LineMatcher for AlternationMatcher {
    fn is_match(&self, line: &str) -> bool {
        self.combined.as_ref().is_some_and(|re| re.is_match(line))
    }

    fn matching_rules(&self, line: &str) -> Vec<&str> {
        self.rules
            .iter()
            .filter(|rule| rule.is_match(line))
            .map(Rule::name)
            .collect()
    }
}
