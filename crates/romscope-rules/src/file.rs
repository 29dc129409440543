use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use romscope_types::Category;

use crate::catalog::{CatalogError, CategoryRule, ContextRule, RuleCatalog};

/// On-disk rule file, deserialized from TOML.
///
/// Category declaration order in the file defines precedence, exactly like
/// the builtin table. Example:
///
/// ```toml
/// [[category]]
/// name = "CRITICAL"
/// keywords = ["fatal", "crash"]
/// patterns = ['\bfatal\b']
/// context = ['killed by signal \d+']
/// ```
#[derive(Debug, Deserialize)]
pub struct RuleFile {
    #[serde(rename = "category")]
    categories: Vec<CategoryEntry>,
}

#[derive(Debug, Deserialize)]
struct CategoryEntry {
    name: String,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    patterns: Vec<String>,
    /// Stricter context patterns checked before all generic rules
    #[serde(default)]
    context: Vec<String>,
}

impl RuleFile {
    /// Read and parse a rule file; malformed TOML fails here
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| CatalogError::ReadFile {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| CatalogError::ParseFile { path, source })
    }

    /// Compile into a catalog; unknown names and malformed regexes fail here
    pub fn compile(self) -> Result<RuleCatalog, CatalogError> {
        let mut rules = Vec::with_capacity(self.categories.len());
        let mut context = Vec::new();

        for entry in &self.categories {
            let category = Category::from_name(&entry.name)
                .ok_or_else(|| CatalogError::UnknownCategory(entry.name.clone()))?;
            rules.push(CategoryRule::compile(category, &entry.keywords, &entry.patterns)?);
            if !entry.context.is_empty() {
                context.push(ContextRule::compile(category, &entry.context)?);
            }
        }

        RuleCatalog::assemble(rules, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_rules(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_and_compile() {
        let file = write_rules(
            r#"
[[category]]
name = "BUILD_FAILED"
keywords = ["build failed"]
patterns = ['ninja.*failed']

[[category]]
name = "WARNING"
keywords = ["warn"]
"#,
        );
        let catalog = RuleCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        let order: Vec<Category> = catalog.ordered_rules().map(|r| r.category()).collect();
        assert_eq!(order, vec![Category::BuildFailed, Category::Warning]);
    }

    #[test]
    fn test_file_context_rules_follow_declaration_order() {
        let file = write_rules(
            r#"
[[category]]
name = "KERNEL_ERROR"
keywords = ["kernel"]
context = ['scripts/dtc.*failed']

[[category]]
name = "VENDOR_BLOBS"
keywords = ["vendor"]
context = ['vendor.*img.*not.*found']
"#,
        );
        let catalog = RuleCatalog::from_file(file.path()).unwrap();
        let order: Vec<Category> = catalog.context_rules().iter().map(|r| r.category()).collect();
        assert_eq!(order, vec![Category::KernelError, Category::VendorBlobs]);
    }

    #[test]
    fn test_unknown_name_rejected() {
        let file = write_rules("[[category]]\nname = \"NOT_A_CATEGORY\"\n");
        let err = RuleCatalog::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownCategory(_)));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let file = write_rules("[[category]]\nname = \"CRITICAL\"\npatterns = ['(unclosed']\n");
        let err = RuleCatalog::from_file(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidPattern { .. }));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = RuleCatalog::from_file("/nonexistent/rules.toml").unwrap_err();
        assert!(matches!(err, CatalogError::ReadFile { .. }));
    }
}
