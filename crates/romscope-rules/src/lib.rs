//! Detection rule catalog for romscope
//!
//! This crate holds the ordered category rule table (keywords plus compiled
//! case-insensitive regexes), the higher-precedence context rules, and
//! optional TOML rule-file loading. The catalog is built once at startup and
//! is read-only afterwards.

mod builtin;
mod catalog;
mod file;
mod tips;

pub use catalog::{CatalogError, CategoryRule, ContextRule, RuleCatalog};
pub use file::RuleFile;
pub use tips::tips_for;

// Re-export types used in our public API
pub use romscope_types::Category;
