#![forbid(unsafe_code)]

//! Rule definitions and registry

pub mod builtin;
mod matcher;
mod registry;
mod rule;

// Re-export core types
pub use matcher::{AlternationMatcher, LineMatcher};
pub use registry::RuleRegistry;
pub use rule::{Rule, RuleRecord};
