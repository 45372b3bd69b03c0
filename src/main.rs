//! forbidden-patterns CLI entry point

use clap::Parser;
use forbidden_patterns::cli::{CheckOptions, Command, args::Cli};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Command::Check {
            paths,
            rules,
            excludes,
            marker,
            format,
        } => {
            let options = CheckOptions {
                paths,
                rules,
                excludes,
                marker,
                format,
            };
            forbidden_patterns::cli::check::run_check(&options, cli.color)
        }
        Command::List { rules, format } => forbidden_patterns::cli::list::run_list(&rules, format),
    };

    process::exit(exit_code);
}
