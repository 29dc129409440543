//! Log line classification engine for romscope
//!
//! This crate provides the two classification entry points (categorized
//! detection against the rule catalog, and plain keyword triage), file
//! scanning with lossy decoding, finding filters, and scan statistics.

mod classify;
mod filter;
mod keywords;
mod scan;
mod stats;

pub use classify::Classifier;
pub use filter::FindingFilter;
pub use keywords::{ERROR_KEYWORDS, classify_by_keywords};
pub use scan::{ScanReport, Scanner, scan_keywords};
pub use stats::ScanStats;

// Re-export types used in our public API
pub use romscope_rules::{CatalogError, RuleCatalog};
pub use romscope_types::{Category, CategoryCounts, Finding, Origin};
