use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use romscope_rules::RuleCatalog;
use romscope_types::{CategoryCounts, Finding};

use crate::classify::Classifier;
use crate::keywords::classify_by_keywords;

/// Result of scanning one file
#[derive(Clone, Debug)]
pub struct ScanReport {
    /// Scanned file path
    pub path: PathBuf,

    /// Findings in line order
    pub findings: Vec<Finding>,

    /// Physical lines in the file (blank and undecodable lines included)
    pub total_lines: u64,

    /// Lines skipped because they were not valid UTF-8
    pub skipped_lines: u64,
}

impl ScanReport {
    /// Finding counts per category
    pub fn counts(&self) -> CategoryCounts {
        self.findings.iter().map(|f| f.category).collect()
    }
}

/// File scanner driving the classifier over each line.
///
/// Blank lines never reach the classifier; lines that fail to decode are
/// skipped (not the whole file) and still consume a line number, so finding
/// positions match editor line numbers.
pub struct Scanner<'a> {
    classifier: Classifier<'a>,
}

impl<'a> Scanner<'a> {
    pub fn new(catalog: &'a RuleCatalog) -> Self {
        Self {
            classifier: Classifier::new(catalog),
        }
    }

    /// Scan a file sequentially
    pub fn scan(&self, path: impl AsRef<Path>) -> io::Result<ScanReport> {
        let path = path.as_ref();
        let lines = read_lines(path)?;

        let findings = lines
            .entries
            .iter()
            .flat_map(|(num, line)| self.classifier.classify_categorized(line, *num))
            .collect();

        Ok(lines.into_report(path, findings))
    }

    /// Scan a file with per-line classification spread across workers.
    ///
    /// Line classifications are independent of each other, so the lines can
    /// be partitioned freely; collection preserves line order. Produces the
    /// same report as `scan`.
    pub fn scan_parallel(&self, path: impl AsRef<Path>) -> io::Result<ScanReport> {
        let path = path.as_ref();
        let lines = read_lines(path)?;

        let findings = lines
            .entries
            .par_iter()
            .flat_map_iter(|(num, line)| self.classifier.classify_categorized(line, *num))
            .collect();

        Ok(lines.into_report(path, findings))
    }
}

/// Plain keyword triage over a file: every matching line is returned,
/// unfiltered by category.
pub fn scan_keywords<S: AsRef<str>>(
    path: impl AsRef<Path>,
    keywords: &[S],
) -> io::Result<Vec<(u64, String)>> {
    let lines = read_lines(path.as_ref())?;
    Ok(lines
        .entries
        .into_iter()
        .filter(|(_, line)| classify_by_keywords(line, keywords))
        .map(|(num, line)| (num, line.trim().to_string()))
        .collect())
}

struct RawLines {
    /// Decoded, non-blank lines with their 1-based numbers
    entries: Vec<(u64, String)>,
    total_lines: u64,
    skipped_lines: u64,
}

impl RawLines {
    fn into_report(self, path: &Path, findings: Vec<Finding>) -> ScanReport {
        ScanReport {
            path: path.to_path_buf(),
            findings,
            total_lines: self.total_lines,
            skipped_lines: self.skipped_lines,
        }
    }
}

fn read_lines(path: &Path) -> io::Result<RawLines> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut entries = Vec::new();
    let mut buf = Vec::new();
    let mut total_lines = 0u64;
    let mut skipped_lines = 0u64;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        total_lines += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }

        match std::str::from_utf8(&buf) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    entries.push((total_lines, line.to_string()));
                }
            }
            Err(_) => {
                skipped_lines += 1;
                tracing::warn!(
                    path = %path.display(),
                    line = total_lines,
                    "skipping line with invalid UTF-8"
                );
            }
        }
    }

    Ok(RawLines {
        entries,
        total_lines,
        skipped_lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use romscope_types::Category;
    use std::io::Write;

    fn write_log(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_scan_numbers_findings_by_physical_line() {
        let catalog = RuleCatalog::builtin().unwrap();
        let scanner = Scanner::new(&catalog);
        let file = write_log(b"all fine\n\nFATAL: crash\nBuild completed successfully\n");

        let report = scanner.scan(file.path()).unwrap();
        assert_eq!(report.total_lines, 4);
        assert_eq!(report.skipped_lines, 0);
        assert_eq!(report.findings.len(), 2);
        assert_eq!(report.findings[0].line_number, 3);
        assert_eq!(report.findings[0].category, Category::Critical);
        assert_eq!(report.findings[1].line_number, 4);
        assert_eq!(report.findings[1].category, Category::SuccessIndicators);
    }

    #[test]
    fn test_blank_and_whitespace_lines_are_skipped() {
        let catalog = RuleCatalog::builtin().unwrap();
        let scanner = Scanner::new(&catalog);
        // "   " alone would never be classified; the scanner must not even
        // hand it to the classifier.
        let file = write_log(b"   \n\t\n\nsegfault at 0x0\n");

        let report = scanner.scan(file.path()).unwrap();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].line_number, 4);
    }

    #[test]
    fn test_invalid_utf8_line_is_skipped_not_fatal() {
        let catalog = RuleCatalog::builtin().unwrap();
        let scanner = Scanner::new(&catalog);
        let file = write_log(b"ok line\n\xff\xfe broken\nFATAL: crash\n");

        let report = scanner.scan(file.path()).unwrap();
        assert_eq!(report.total_lines, 3);
        assert_eq!(report.skipped_lines, 1);
        assert_eq!(report.findings.len(), 1);
        // Numbering still counts the skipped line
        assert_eq!(report.findings[0].line_number, 3);
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let catalog = RuleCatalog::builtin().unwrap();
        let scanner = Scanner::new(&catalog);
        let mut content = Vec::new();
        for i in 0..200 {
            match i % 4 {
                0 => content.extend_from_slice(b"ninja: subcommand failed\n"),
                1 => content.extend_from_slice(b"nothing interesting qq\n"),
                2 => content.extend_from_slice(b"warning: deprecated API\n"),
                _ => content.extend_from_slice(b"repo sync finished\n"),
            }
        }
        let file = write_log(&content);

        let sequential = scanner.scan(file.path()).unwrap();
        let parallel = scanner.scan_parallel(file.path()).unwrap();
        assert_eq!(sequential.findings, parallel.findings);
        assert_eq!(sequential.total_lines, parallel.total_lines);
    }

    #[test]
    fn test_scan_keywords_plain_mode() {
        let file = write_log(b"Permission denied while writing\nall good\ntimeout waiting\n");
        let hits = scan_keywords(file.path(), &["permission denied", "timeout"]).unwrap();
        assert_eq!(
            hits,
            vec![
                (1, "Permission denied while writing".to_string()),
                (3, "timeout waiting".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let catalog = RuleCatalog::builtin().unwrap();
        let scanner = Scanner::new(&catalog);
        assert!(scanner.scan("/nonexistent/build.log").is_err());
    }

    #[test]
    fn test_counts() {
        let catalog = RuleCatalog::builtin().unwrap();
        let scanner = Scanner::new(&catalog);
        let file = write_log(b"FATAL: crash\nsegfault at 0x0\nwarning: check this\n");

        let report = scanner.scan(file.path()).unwrap();
        let counts = report.counts();
        assert_eq!(counts.get(Category::Critical), 2);
        assert_eq!(counts.get(Category::Warning), 1);
        assert_eq!(counts.total(), 3);
    }
}
