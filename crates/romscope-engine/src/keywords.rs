/// Keyword list for the plain error/not-error triage mode.
///
/// Used when no category breakdown is needed: a line is interesting if any
/// of these appears as a case-insensitive substring.
pub const ERROR_KEYWORDS: &[&str] = &[
    "fail",
    "error",
    "unable",
    "not found",
    "exception",
    "cannot",
    "no such",
    "permission denied",
    "timeout",
    "segfault",
    "panic",
    "missing",
    "denied",
    "abort",
    "fatal",
    "unreachable",
    "not registered",
    "unresolved",
    "crash",
    "corrupt",
    "invalid",
    "failed",
    "warning",
];

/// Binary error detection: does the line contain any keyword as a
/// case-insensitive substring?
pub fn classify_by_keywords<S: AsRef<str>>(line: &str, keywords: &[S]) -> bool {
    let lower = line.to_lowercase();
    keywords
        .iter()
        .any(|kw| lower.contains(&kw.as_ref().to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_hit() {
        assert!(classify_by_keywords(
            "Permission denied while writing",
            &["permission denied", "timeout"]
        ));
    }

    #[test]
    fn test_keyword_miss() {
        assert!(!classify_by_keywords("all good here", &["permission denied", "timeout"]));
    }

    #[test]
    fn test_default_list_catches_common_errors() {
        assert!(classify_by_keywords("FATAL: out of memory", ERROR_KEYWORDS));
        assert!(classify_by_keywords("package not found", ERROR_KEYWORDS));
        assert!(!classify_by_keywords("Starting build step 3", ERROR_KEYWORDS));
    }
}
