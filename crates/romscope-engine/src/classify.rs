use romscope_rules::RuleCatalog;
use romscope_types::{Finding, Origin};

/// Classifier for single log lines.
///
/// Borrows a read-only catalog built at startup; classification is a pure
/// function of the line text and the catalog, with no state across calls,
/// so a `Classifier` can be shared freely across threads.
#[derive(Clone, Copy, Debug)]
pub struct Classifier<'a> {
    catalog: &'a RuleCatalog,
}

impl<'a> Classifier<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a RuleCatalog {
        self.catalog
    }

    /// Classify one non-blank line into at most one finding.
    ///
    /// Context rules are tried first, in the catalog's category order; the
    /// first context hit wins and the standard rules are not consulted at
    /// all for that line. Otherwise the generic rules are walked in
    /// precedence order and the first category matching by keyword or
    /// pattern wins. First-in-order is the documented tie-break policy, not
    /// a best-match search.
    pub fn classify_categorized(&self, line: &str, line_number: u64) -> Vec<Finding> {
        let trimmed = line.trim();
        let lower = trimmed.to_lowercase();

        for rule in self.catalog.context_rules() {
            if rule.matches(trimmed) {
                return vec![Finding::new(
                    line_number,
                    trimmed,
                    rule.category(),
                    Origin::ContextSpecific,
                )];
            }
        }

        for rule in self.catalog.ordered_rules() {
            if rule.matches_keywords(&lower) || rule.matches_patterns(trimmed) {
                return vec![Finding::new(
                    line_number,
                    trimmed,
                    rule.category(),
                    Origin::Standard,
                )];
            }
        }

        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use romscope_types::Category;

    fn classifier_catalog() -> RuleCatalog {
        RuleCatalog::builtin().unwrap()
    }

    #[test]
    fn test_at_most_one_finding_per_line() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        let lines = [
            "FATAL: system crash detected",
            "ninja: build stopped: subcommand failed",
            "warning: deprecated declaration",
            "plain line with nothing notable at all",
        ];
        for line in lines {
            assert!(classifier.classify_categorized(line, 1).len() <= 1, "line: {line}");
        }
    }

    #[test]
    fn test_critical_takes_precedence() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        // "crash" and "fatal" are both CRITICAL keywords; CRITICAL precedes
        // every other matching category.
        let findings = classifier.classify_categorized("FATAL: system crash detected", 7);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::Critical);
        assert_eq!(findings[0].origin, Origin::Standard);
        assert_eq!(findings[0].line_number, 7);
    }

    #[test]
    fn test_first_in_order_wins_over_later_match() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        // Matches both BUILD_FAILED (ninja.*failed) and SOONG_BUILD
        // (ninja.*build.*stopped); BUILD_FAILED comes first.
        let findings =
            classifier.classify_categorized("ninja: build stopped: subcommand failed", 1);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::BuildFailed);
    }

    #[test]
    fn test_context_match_beats_standard_rules() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        let findings =
            classifier.classify_categorized("vendor/qcom/proprietary-files.txt not found", 42);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::VendorBlobs);
        assert_eq!(findings[0].origin, Origin::ContextSpecific);
    }

    #[test]
    fn test_context_beats_higher_precedence_standard_category() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        // "fatal" would hit CRITICAL in the standard phase, but the
        // MEMORY_SPACE context signature fires first and ends evaluation.
        let findings =
            classifier.classify_categorized("fatal: cc1plus ran out of memory during build", 3);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::MemorySpace);
        assert_eq!(findings[0].origin, Origin::ContextSpecific);
    }

    #[test]
    fn test_first_context_rule_wins_when_several_match() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        // Hits both the KERNEL_ERROR (drivers.*\.ko.*failed) and SOONG_BUILD
        // (out/soong.*build.*ninja.*failed) context signatures; only the
        // first in catalog order may produce a finding.
        let line = "drivers/gpu/msm.ko failed while writing out/soong/build.ninja, build failed";
        let findings = classifier.classify_categorized(line, 1);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::KernelError);
        assert_eq!(findings[0].origin, Origin::ContextSpecific);
    }

    #[test]
    fn test_success_indicators() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        let findings = classifier.classify_categorized("Build completed successfully", 100);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].category, Category::SuccessIndicators);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        assert!(
            classifier
                .classify_categorized("qqqq zzzz 1234", 1)
                .is_empty()
        );
    }

    #[test]
    fn test_raw_text_is_trimmed() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        let findings = classifier.classify_categorized("   FATAL: crash   ", 1);
        assert_eq!(findings[0].raw_text, "FATAL: crash");
    }

    #[test]
    fn test_idempotent() {
        let catalog = classifier_catalog();
        let classifier = Classifier::new(&catalog);
        let line = "error: RPC failed; curl 56 GnuTLS recv error";
        let first = classifier.classify_categorized(line, 9);
        let second = classifier.classify_categorized(line, 9);
        assert_eq!(first, second);
    }

    #[test]
    fn test_classifier_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Classifier<'_>>();
    }
}
