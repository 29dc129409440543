use std::path::PathBuf;

use regex::Regex;
use thiserror::Error;

use romscope_types::Category;

use crate::builtin::{CATEGORY_SPECS, CONTEXT_SPECS};
use crate::file::RuleFile;

/// Errors raised while constructing or querying a rule catalog.
///
/// All of these are startup-time failures: a catalog with a bad pattern or a
/// bad category name must never become usable.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("invalid pattern `{pattern}` for {category}: {source}")]
    InvalidPattern {
        category: Category,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read rules file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Generic detection rule for one category
#[derive(Clone, Debug)]
pub struct CategoryRule {
    category: Category,
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl CategoryRule {
    pub(crate) fn compile(
        category: Category,
        keywords: impl IntoIterator<Item = impl AsRef<str>>,
        patterns: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
            patterns: compile_patterns(category, patterns)?,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Keyword test: any keyword contained in the lowercased line
    pub fn matches_keywords(&self, line_lower: &str) -> bool {
        self.keywords.iter().any(|kw| line_lower.contains(kw.as_str()))
    }

    /// Pattern test: any regex found in the original-case line
    pub fn matches_patterns(&self, line: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(line))
    }
}

/// Higher-precedence override rule with stricter, build-specific patterns
#[derive(Clone, Debug)]
pub struct ContextRule {
    category: Category,
    patterns: Vec<Regex>,
}

impl ContextRule {
    pub(crate) fn compile(
        category: Category,
        patterns: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            category,
            patterns: compile_patterns(category, patterns)?,
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn matches(&self, line: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(line))
    }
}

fn compile_patterns(
    category: Category,
    patterns: impl IntoIterator<Item = impl AsRef<str>>,
) -> Result<Vec<Regex>, CatalogError> {
    patterns
        .into_iter()
        .map(|p| {
            let pattern = p.as_ref();
            // Prepend (?i) for case insensitive matching
            Regex::new(&format!("(?i){pattern}")).map_err(|source| CatalogError::InvalidPattern {
                category,
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}

/// The ordered, read-only detection rule catalog.
///
/// Rule order is precedence order: the classifier walks `ordered_rules` and
/// stops at the first match. Context rules are held in the same category
/// order and are always consulted first.
#[derive(Clone, Debug)]
pub struct RuleCatalog {
    rules: Vec<CategoryRule>,
    context: Vec<ContextRule>,
}

impl RuleCatalog {
    /// Build the builtin ROM build catalog
    pub fn builtin() -> Result<Self, CatalogError> {
        let rules = CATEGORY_SPECS
            .iter()
            .map(|spec| CategoryRule::compile(spec.category, spec.keywords, spec.patterns))
            .collect::<Result<Vec<_>, _>>()?;

        let context = CONTEXT_SPECS
            .iter()
            .map(|&(category, patterns)| ContextRule::compile(category, patterns))
            .collect::<Result<Vec<_>, _>>()?;

        Self::assemble(rules, context)
    }

    /// Load a catalog from a TOML rule file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        RuleFile::load(path)?.compile()
    }

    pub(crate) fn assemble(
        rules: Vec<CategoryRule>,
        mut context: Vec<ContextRule>,
    ) -> Result<Self, CatalogError> {
        for (i, rule) in rules.iter().enumerate() {
            if rules[..i].iter().any(|r| r.category == rule.category) {
                return Err(CatalogError::DuplicateCategory(rule.category.to_string()));
            }
        }

        // Context rules follow the catalog's category order, and may only
        // reference categories the catalog defines.
        let position = |category: Category| -> Result<usize, CatalogError> {
            rules
                .iter()
                .position(|r| r.category == category)
                .ok_or_else(|| CatalogError::UnknownCategory(category.to_string()))
        };
        for rule in &context {
            position(rule.category)?;
        }
        context.sort_by_key(|rule| {
            rules
                .iter()
                .position(|r| r.category == rule.category)
                .unwrap_or(usize::MAX)
        });

        Ok(Self { rules, context })
    }

    /// Look up a category's rule by its stable name
    pub fn lookup(&self, name: &str) -> Result<&CategoryRule, CatalogError> {
        let category = Category::from_name(name)
            .ok_or_else(|| CatalogError::UnknownCategory(name.to_string()))?;
        self.rule_for(category)
            .ok_or_else(|| CatalogError::UnknownCategory(name.to_string()))
    }

    /// Rule for a category, if this catalog defines one
    pub fn rule_for(&self, category: Category) -> Option<&CategoryRule> {
        self.rules.iter().find(|r| r.category == category)
    }

    /// Category rules in precedence order
    pub fn ordered_rules(&self) -> impl Iterator<Item = &CategoryRule> {
        self.rules.iter()
    }

    /// Context rules, in the catalog's category order
    pub fn context_rules(&self) -> &[ContextRule] {
        &self.context
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
