//! Parsing and validation for forbidden-patterns.toml

use crate::engine::Encoding;
use crate::error::ConfigError;
use crate::rules::{RuleRecord, RuleRegistry};
use crate::types::GlobPattern;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name, looked up in the project root
pub const CONFIG_FILE_NAME: &str = "forbidden-patterns.toml";

/// Main configuration struct for forbidden-patterns.toml
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// File selection and output settings
    #[serde(default)]
    pub check: CheckConfig,

    /// Extra rules, registered on top of the mandatory ones
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load `forbidden-patterns.toml` from `root`, or defaults if absent
    pub fn load_or_default(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!("Using config {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate glob patterns and the encoding list
    fn validate(&self) -> Result<(), ConfigError> {
        for pattern in self.check.include.iter().chain(&self.check.exclude) {
            globset::Glob::new(pattern.as_str()).map_err(|e| ConfigError::InvalidGlob {
                pattern: pattern.as_str().to_string(),
                source: e,
            })?;
        }

        if self.check.encodings.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "check.encodings".to_string(),
                message: "at least one encoding is required".to_string(),
            });
        }

        Ok(())
    }

    /// Registry with the mandatory rules plus every configured rule
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError` raised by a rule record.
    pub fn build_registry(&self) -> Result<RuleRegistry, ConfigError> {
        let mut registry = RuleRegistry::new()?;
        for record in &self.rules {
            registry.register_record(record.clone())?;
        }
        Ok(registry)
    }
}

/// The `[check]` section
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CheckConfig {
    /// File patterns to include
    #[serde(default = "default_include")]
    pub include: Vec<GlobPattern>,

    /// File patterns to exclude, on top of the binary excludes
    #[serde(default)]
    pub exclude: Vec<GlobPattern>,

    /// Build output directory holding the marker, relative to the root
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Decoding strategies, tried in order
    #[serde(default = "Encoding::default_order")]
    pub encodings: Vec<Encoding>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            exclude: Vec::new(),
            build_dir: default_build_dir(),
            encodings: Encoding::default_order(),
        }
    }
}

fn default_include() -> Vec<GlobPattern> {
    vec![GlobPattern::new(crate::engine::file_filter::DEFAULT_INCLUDE)]
}

fn default_build_dir() -> PathBuf {
    PathBuf::from(crate::engine::scanner::DEFAULT_BUILD_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
[check]
include = ["src/**"]
exclude = ["**/generated/**"]
build-dir = "target/precommit"
encodings = ["utf-8"]

[[rules]]
name = "no-println"
pattern = "println!"

[[rules]]
name = "no-dbg"
pattern = "dbg!"
"#;

    #[test]
    fn test_parse_valid_config() {
        let config = Config::parse(VALID_CONFIG).unwrap();
        assert_eq!(config.check.include, vec![GlobPattern::new("src/**")]);
        assert_eq!(config.check.exclude, vec![GlobPattern::new("**/generated/**")]);
        assert_eq!(config.check.build_dir, PathBuf::from("target/precommit"));
        assert_eq!(config.check.encodings, vec![Encoding::Utf8]);
        assert_eq!(config.rules.len(), 2);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.check.include, vec![GlobPattern::new("**")]);
        assert_eq!(config.check.build_dir, PathBuf::from("build"));
        assert_eq!(config.check.encodings, Encoding::default_order());
    }

    #[test]
    fn test_build_registry_adds_rules() {
        let registry = Config::parse(VALID_CONFIG).unwrap().build_registry().unwrap();
        assert_eq!(registry.len(), 5);
        assert!(registry.contains("no-println"));
        assert!(registry.contains("no-dbg"));
    }

    #[test]
    fn test_rule_with_unknown_key_fails_registry() {
        let config = Config::parse(
            r#"
[[rules]]
name = "typo"
patern = "x"
"#,
        )
        .unwrap();
        let err = config.build_registry().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("pattern")));

        let config = Config::parse(
            r#"
[[rules]]
name = "extra"
pattern = "x"
description = "not supported"
"#,
        )
        .unwrap();
        let err = config.build_registry().unwrap_err();
        assert_eq!(err.to_string(), "unknown argument description");
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result = Config::parse("[output]\nformat = \"json\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unknown_check_key_rejected() {
        let result = Config::parse("[check]\nexcludes = [\"x\"]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_invalid_glob_rejected() {
        let result = Config::parse("[check]\nexclude = [\"[bad\"]\n");
        assert!(matches!(result, Err(ConfigError::InvalidGlob { .. })));
    }

    #[test]
    fn test_empty_encodings_rejected() {
        let result = Config::parse("[check]\nencodings = []\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let result = Config::parse("[check]\nencodings = [\"ebcdic\"]\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
