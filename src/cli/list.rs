//! List command implementation
//!
//! Prints every rule a check would apply: the mandatory rules plus those
//! from the configuration file and the command line.

use crate::cli::args::{OutputFormat, RuleOptions};
use crate::cli::common::{EXIT_ERROR, EXIT_SUCCESS, build_registry, load_config};
use crate::error::ConfigError;
use crate::rules::{Rule, RuleRegistry};
use serde::Serialize;

/// Run the list command
///
/// # Returns
///
/// Exit code:
/// - 0: Success
/// - 2: Configuration error
pub fn run_list(options: &RuleOptions, format: OutputFormat) -> i32 {
    match run_list_inner(options) {
        Ok(registry) => {
            print!("{}", format_rules(&registry, format));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

fn run_list_inner(options: &RuleOptions) -> Result<RuleRegistry, ConfigError> {
    let config = load_config(options)?;
    build_registry(&config, options)
}

/// JSONL rule record
#[derive(Debug, Serialize)]
struct RuleRecordOut<'a> {
    name: &'a str,
    pattern: &'a str,
}

/// Render the registry, one rule per line
pub(crate) fn format_rules(registry: &RuleRegistry, format: OutputFormat) -> String {
    let mut output = String::new();
    for rule in registry.iter_rules() {
        match format {
            OutputFormat::Human => {
                output.push_str(&format!("{}: {}\n", rule.name(), display_pattern(rule)));
            }
            OutputFormat::Jsonl => {
                let record = RuleRecordOut {
                    name: rule.name(),
                    pattern: rule.pattern(),
                };
                if let Ok(json) = serde_json::to_string(&record) {
                    output.push_str(&json);
                    output.push('\n');
                }
            }
        }
    }
    output
}

/// Pattern text with control characters made visible
fn display_pattern(rule: &Rule) -> String {
    rule.pattern().escape_debug().to_string()
}
