#![forbid(unsafe_code)]

//! Rule registry for managing named patterns
//!
//! The RuleRegistry is responsible for:
//! - Seeding the mandatory baseline rules
//! - Accepting additional rules at configuration time
//! - Building the combined matcher used by the scanner

use crate::error::{ConfigError, ScanError};
use crate::rules::builtin::baseline_rules;
use crate::rules::{AlternationMatcher, Rule, RuleRecord};
use std::collections::BTreeMap;

/// Registry mapping rule names to patterns
///
/// Registration replaces any previous rule of the same name. Iteration is
/// ordered by name so reports are deterministic. A registry is consumed by
/// the scanner, so no rule can be added once scanning starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRegistry {
    rules: BTreeMap<String, Rule>,
}

impl RuleRegistry {
    /// Create a registry seeded with the mandatory rules
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a mandatory rule fails validation; no
    /// registry is ever produced without all of them.
    pub fn new() -> Result<Self, ConfigError> {
        Self::seeded_with(baseline_rules())
    }

    /// Registry holding exactly `seed`, failing on the first invalid rule
    fn seeded_with<'a>(
        seed: impl IntoIterator<Item = (&'a str, String)>,
    ) -> Result<Self, ConfigError> {
        let rules = seed
            .into_iter()
            .map(|(name, pattern)| Ok((name.to_string(), Rule::new(name, &pattern)?)))
            .collect::<Result<BTreeMap<_, _>, ConfigError>>()?;
        Ok(Self { rules })
    }

    /// Register a rule, replacing any rule with the same name
    ///
    /// The pattern is compiled immediately; the registry is untouched when
    /// validation fails.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the name or pattern is empty, the pattern
    /// contains a newline, or the pattern is not a valid regex.
    pub fn register(&mut self, name: &str, pattern: &str) -> Result<(), ConfigError> {
        let rule = Rule::new(name, pattern)?;
        if let Some(previous) = self.rules.insert(name.to_string(), rule) {
            tracing::debug!(
                "Rule [{}] overrides previous pattern '{}'",
                name,
                previous.pattern()
            );
        }
        Ok(())
    }

    /// Register a rule from a configuration record
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for a missing `name` or `pattern`, for any
    /// unknown key, and for everything `register` rejects.
    pub fn register_record(&mut self, record: RuleRecord) -> Result<(), ConfigError> {
        let (name, pattern) = record.into_parts()?;
        self.register(&name, &pattern)
    }

    /// Get a rule by its name
    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Check whether a rule is registered
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Iterate over all rules in name order
    pub fn iter_rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values()
    }

    /// Get the number of rules in the registry
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Build the matcher for every registered rule
    ///
    /// # Errors
    ///
    /// Returns `ScanError::CombinedPattern` if the alternation cannot be compiled.
    pub fn combined_matcher(&self) -> Result<AlternationMatcher, ScanError> {
        AlternationMatcher::new(self.rules.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::{NOCOMMIT_CASE_RULE, NOCOMMIT_RULE, TAB_RULE};
    use crate::rules::LineMatcher;

    #[test]
    fn test_new_has_baseline() {
        let registry = RuleRegistry::new().unwrap();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains(NOCOMMIT_RULE));
        assert!(registry.contains(NOCOMMIT_CASE_RULE));
        assert!(registry.contains(TAB_RULE));
    }

    #[test]
    fn test_invalid_seed_rule_fails_construction() {
        let seed = vec![("tab", "\t".to_string()), ("broken", "(".to_string())];
        let result = RuleRegistry::seeded_with(seed);
        assert!(matches!(result, Err(ConfigError::InvalidPattern { ref name, .. }) if name == "broken"));
    }

    #[test]
    fn test_baseline_seed_all_compile() {
        let seeded = RuleRegistry::seeded_with(baseline_rules()).unwrap();
        assert_eq!(seeded.len(), baseline_rules().len());
    }

    #[test]
    fn test_register_adds_rule() {
        let mut registry = RuleRegistry::new().unwrap();
        registry.register("todo", "TODO").unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("todo").map(Rule::pattern), Some("TODO"));
    }

    #[test]
    fn test_register_overwrites_same_name() {
        let mut registry = RuleRegistry::new().unwrap();
        registry.register("debug", "println!").unwrap();
        registry.register("debug", "dbg!").unwrap();
        assert_eq!(registry.len(), 4);

        let matcher = registry.combined_matcher().unwrap();
        assert!(!matcher.is_match("println!(\"x\")"));
        assert!(matcher.is_match("dbg!(x)"));
    }

    #[test]
    fn test_failed_registration_leaves_registry_unchanged() {
        let mut registry = RuleRegistry::new().unwrap();
        registry.register("debug", "println!").unwrap();
        let before = registry.clone();

        assert!(registry.register("", "x").is_err());
        assert!(registry.register("debug", "").is_err());
        assert!(registry.register("debug", "(").is_err());
        assert!(
            registry
                .register_record(RuleRecord::new().with("name", "x"))
                .is_err()
        );
        assert!(
            registry
                .register_record(
                    RuleRecord::new()
                        .with("name", "debug")
                        .with("pattern", "dbg!")
                        .with("extra", "1")
                )
                .is_err()
        );

        assert_eq!(registry, before);
    }

    #[test]
    fn test_register_record() {
        let mut registry = RuleRegistry::new().unwrap();
        registry
            .register_record(RuleRecord::new().with("name", "fixme").with("pattern", "FIXME"))
            .unwrap();
        assert!(registry.contains("fixme"));
    }

    #[test]
    fn test_iter_rules_ordered_by_name() {
        let mut registry = RuleRegistry::new().unwrap();
        registry.register("zzz", "z").unwrap();
        registry.register("aaa", "a").unwrap();
        let names: Vec<&str> = registry.iter_rules().map(Rule::name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_registries_are_independent() {
        let mut first = RuleRegistry::new().unwrap();
        first.register("only-here", "x").unwrap();
        let second = RuleRegistry::new().unwrap();
        assert!(!second.contains("only-here"));
    }
}
