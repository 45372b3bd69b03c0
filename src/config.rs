//! Configuration file parsing and validation

pub mod settings;

pub use settings::{CONFIG_FILE_NAME, CheckConfig, Config};
