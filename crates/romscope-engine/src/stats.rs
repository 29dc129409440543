use romscope_types::{Category, CategoryCounts};

use crate::scan::ScanReport;

/// Summary statistics for one scan
#[derive(Clone, Debug)]
pub struct ScanStats {
    counts: CategoryCounts,
    total_findings: usize,
    lines_scanned: u64,
}

impl ScanStats {
    pub fn from_report(report: &ScanReport) -> Self {
        Self {
            counts: report.counts(),
            total_findings: report.findings.len(),
            lines_scanned: report.total_lines,
        }
    }

    pub fn counts(&self) -> &CategoryCounts {
        &self.counts
    }

    pub fn total_findings(&self) -> usize {
        self.total_findings
    }

    pub fn lines_scanned(&self) -> u64 {
        self.lines_scanned
    }

    /// Share of all findings in this category, as a percentage
    pub fn percentage(&self, category: Category) -> f64 {
        if self.total_findings == 0 {
            return 0.0;
        }
        self.counts.get(category) as f64 / self.total_findings as f64 * 100.0
    }

    /// Findings per 100 scanned lines
    pub fn issue_density(&self) -> f64 {
        if self.lines_scanned == 0 {
            return 0.0;
        }
        self.total_findings as f64 / self.lines_scanned as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use romscope_types::{Finding, Origin};
    use std::path::PathBuf;

    fn report(categories: &[Category], total_lines: u64) -> ScanReport {
        ScanReport {
            path: PathBuf::from("build.log"),
            findings: categories
                .iter()
                .enumerate()
                .map(|(i, &c)| Finding::new(i as u64 + 1, "line", c, Origin::Standard))
                .collect(),
            total_lines,
            skipped_lines: 0,
        }
    }

    #[test]
    fn test_stats_from_report() {
        let stats = ScanStats::from_report(&report(
            &[Category::Critical, Category::Critical, Category::Warning, Category::Info],
            200,
        ));
        assert_eq!(stats.total_findings(), 4);
        assert_eq!(stats.counts().get(Category::Critical), 2);
        assert_eq!(stats.percentage(Category::Critical), 50.0);
        assert_eq!(stats.percentage(Category::BuildFailed), 0.0);
        assert_eq!(stats.issue_density(), 2.0);
    }

    #[test]
    fn test_empty_report_has_zero_density() {
        let stats = ScanStats::from_report(&report(&[], 0));
        assert_eq!(stats.total_findings(), 0);
        assert_eq!(stats.issue_density(), 0.0);
        assert_eq!(stats.percentage(Category::Critical), 0.0);
    }
}
