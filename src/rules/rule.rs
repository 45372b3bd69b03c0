#![forbid(unsafe_code)]

//! A single named pattern and the configuration record it is built from

use crate::error::ConfigError;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A named regular expression that must not appear on any line
#[derive(Clone)]
pub struct Rule {
    name: String,
    regex: Regex,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.regex.as_str())
            .finish()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.pattern() == other.pattern()
    }
}

impl Eq for Rule {}

impl Rule {
    /// Validates and compiles a rule
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `name` or `pattern` is empty
    /// - `pattern` contains a newline
    /// - `pattern` is not a valid regular expression
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::MissingField("name"));
        }
        if pattern.is_empty() {
            return Err(ConfigError::MissingField("pattern"));
        }
        if pattern.contains('\n') {
            return Err(ConfigError::MultilinePattern(name));
        }

        let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
            name: name.clone(),
            source: Box::new(e),
        })?;

        Ok(Self { name, regex })
    }

    /// Rule name, used verbatim in violation messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Regex source text
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether the pattern occurs anywhere in `line`
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }
}

/// A rule registration record as written in configuration
///
/// Only `name` and `pattern` are accepted. The record is kept as a loose
/// map so that typos surface as explicit errors instead of being dropped by
/// the deserializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RuleRecord(BTreeMap<String, String>);

impl RuleRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field, returning the record for chaining
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Splits the record into `(name, pattern)`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when `name` or `pattern` is absent
    /// and `ConfigError::UnknownArgument` when any other key is present.
    pub fn into_parts(mut self) -> Result<(String, String), ConfigError> {
        let name = self
            .0
            .remove("name")
            .ok_or(ConfigError::MissingField("name"))?;
        let pattern = self
            .0
            .remove("pattern")
            .ok_or(ConfigError::MissingField("pattern"))?;

        if !self.0.is_empty() {
            return Err(ConfigError::UnknownArgument(self.0.into_keys().collect()));
        }

        Ok((name, pattern))
    }
}

impl<K, V> FromIterator<(K, V)> for RuleRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_new_valid() {
        let rule = Rule::new("todo", "TODO").unwrap();
        assert_eq!(rule.name(), "todo");
        assert_eq!(rule.pattern(), "TODO");
        assert!(rule.is_match("// TODO later"));
        assert!(!rule.is_match("// done"));
    }

    #[test]
    fn test_rule_new_empty_fields() {
        assert!(matches!(
            Rule::new("", "x"),
            Err(ConfigError::MissingField("name"))
        ));
        assert!(matches!(
            Rule::new("x", ""),
            Err(ConfigError::MissingField("pattern"))
        ));
    }

    #[test]
    fn test_rule_new_invalid_regex() {
        let err = Rule::new("broken", "[unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { ref name, .. } if name == "broken"));
    }

    #[test]
    fn test_rule_new_rejects_newline() {
        assert!(matches!(
            Rule::new("two-lines", "foo\nbar"),
            Err(ConfigError::MultilinePattern(_))
        ));
    }

    #[test]
    fn test_record_into_parts() {
        let record = RuleRecord::new().with("name", "todo").with("pattern", "TODO");
        assert_eq!(
            record.into_parts().unwrap(),
            ("todo".to_string(), "TODO".to_string())
        );
    }

    #[test]
    fn test_record_missing_fields() {
        let no_name = RuleRecord::new().with("pattern", "TODO");
        assert!(matches!(
            no_name.into_parts(),
            Err(ConfigError::MissingField("name"))
        ));

        let no_pattern = RuleRecord::new().with("name", "todo");
        assert!(matches!(
            no_pattern.into_parts(),
            Err(ConfigError::MissingField("pattern"))
        ));
    }

    #[test]
    fn test_record_unknown_argument() {
        let record: RuleRecord = [("name", "todo"), ("pattern", "TODO"), ("severity", "high")]
            .into_iter()
            .collect();
        let err = record.into_parts().unwrap_err();
        assert_eq!(err.to_string(), "unknown argument severity");
    }
}
