//! CLI argument parsing using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for forbidden-patterns commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Automatically detect if terminal supports color
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

impl From<ColorChoice> for termcolor::ColorChoice {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => {
                if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
                    termcolor::ColorChoice::Auto
                } else {
                    termcolor::ColorChoice::Never
                }
            }
            ColorChoice::Always => termcolor::ColorChoice::Always,
            ColorChoice::Never => termcolor::ColorChoice::Never,
        }
    }
}

/// forbidden-patterns CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "forbidden-patterns")]
#[command(about = "Checks source files for invalid patterns like nocommits or tabs")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options shared by commands that build a rule registry
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RuleOptions {
    /// Project root; reported paths are relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file (defaults to <root>/forbidden-patterns.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extra rule as NAME=PATTERN (repeatable)
    #[arg(long = "rule", value_name = "NAME=PATTERN")]
    pub rules: Vec<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan files and fail if any forbidden pattern is found
    Check {
        /// Files or directories to check (defaults to the project root)
        paths: Vec<PathBuf>,

        #[command(flatten)]
        rules: RuleOptions,

        /// Extra exclude glob, appended to the built-in binary excludes (repeatable)
        #[arg(long = "exclude", value_name = "GLOB")]
        excludes: Vec<String>,

        /// Marker file written on success
        /// (defaults to <root>/<build-dir>/markers/forbiddenPatterns)
        #[arg(long)]
        marker: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },

    /// List all registered rules
    List {
        #[command(flatten)]
        rules: RuleOptions,

        /// Output format
        #[arg(short, long, default_value = "human")]
        format: OutputFormat,
    },
}
