//! Common helper functions shared across CLI commands
//!
//! This module loads configuration and builds the rule registry from the
//! configuration file and command-line rules.

use crate::cli::args::RuleOptions;
use crate::config::Config;
use crate::error::ConfigError;
use crate::rules::{RuleRecord, RuleRegistry};

/// Process exit codes
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Load the configuration named by `--config`, or the project default
///
/// # Errors
///
/// Returns `ConfigError` if an explicit file is missing or any file is invalid.
pub(crate) fn load_config(options: &RuleOptions) -> Result<Config, ConfigError> {
    match &options.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(&options.root),
    }
}

/// Build the registry from configured rules, then command-line rules
///
/// Command-line rules are registered last, so they override configured
/// rules of the same name.
///
/// # Errors
///
/// Returns the first `ConfigError` raised by any rule.
pub(crate) fn build_registry(
    config: &Config,
    options: &RuleOptions,
) -> Result<RuleRegistry, ConfigError> {
    let mut registry = config.build_registry()?;
    for arg in &options.rules {
        registry.register_record(parse_rule_arg(arg)?)?;
    }
    Ok(registry)
}

/// Parse a `NAME=PATTERN` argument into a rule record
///
/// Only the first `=` separates name from pattern, so patterns may contain `=`.
pub(crate) fn parse_rule_arg(arg: &str) -> Result<RuleRecord, ConfigError> {
    let (name, pattern) = arg.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
        field: "--rule".to_string(),
        message: format!("expected NAME=PATTERN, got '{arg}'"),
    })?;
    Ok(RuleRecord::new().with("name", name).with("pattern", pattern))
}
