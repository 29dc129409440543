use std::collections::HashSet;

use romscope_types::{Category, Finding};

/// Composable filter for findings
#[derive(Clone, Debug, Default)]
pub struct FindingFilter {
    /// Substring the raw line must contain (if any)
    pattern: Option<String>,

    /// Categories to include (empty = all)
    categories: HashSet<Category>,

    /// Drop warning/info/success findings
    fail_only: bool,
}

impl FindingFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only findings whose raw text contains the substring
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Keep only findings in the given categories
    pub fn with_categories(mut self, categories: HashSet<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Keep only failure categories
    pub fn fail_only(mut self) -> Self {
        self.fail_only = true;
        self
    }

    /// Check if a finding passes this filter
    pub fn matches(&self, finding: &Finding) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&finding.category) {
            return false;
        }

        if self.fail_only && !finding.category.is_failure() {
            return false;
        }

        match &self.pattern {
            Some(pattern) => finding.raw_text.contains(pattern.as_str()),
            None => true,
        }
    }

    /// Check if filter is empty (matches everything)
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none() && self.categories.is_empty() && !self.fail_only
    }

    /// Apply to a finding sequence, preserving order
    pub fn apply(&self, findings: &[Finding]) -> Vec<Finding> {
        findings.iter().filter(|f| self.matches(f)).cloned().collect()
    }
}
