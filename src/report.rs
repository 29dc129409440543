use std::path::{Path, PathBuf};

use colored::{Color, Colorize};

use romscope_engine::{Category, Finding, ScanStats};
use romscope_rules::tips_for;

/// Terminal color for a category (nearest ANSI color to its display hint)
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Critical | Category::BuildFailed | Category::CompilerError => Color::Red,
        Category::Warning | Category::SepolicyError | Category::DeviceSpecific => Color::Yellow,
        Category::Info => Color::Blue,
        Category::SuccessIndicators | Category::TrebleCompatibility => Color::Green,
        Category::ManifestSync | Category::OtaPackage => Color::Cyan,
        _ => Color::Magenta,
    }
}

/// One finding as a terminal line: icon, category tag, line number, message,
/// then the offending line itself
pub fn print_finding(finding: &Finding) {
    let color = category_color(finding.category);
    let tag = format!("{} [{}]", finding.category.icon(), finding.category);
    println!(
        "{} {} {}",
        tag.color(color).bold(),
        format!("Line {}:", finding.line_number).bold(),
        finding.message
    );
    println!("    {}", finding.raw_text.color(color));
}

/// Per-category summary block for one scan
pub fn print_stats(stats: &ScanStats) {
    println!();
    println!("{}", "Scan statistics".bold());
    println!("  Lines scanned: {}", stats.lines_scanned());
    println!("  Issues found:  {}", stats.total_findings());
    for (category, count) in stats.counts().iter() {
        println!(
            "  {} {}: {} ({:.1}%)",
            category.icon(),
            category,
            count,
            stats.percentage(category)
        );
    }
    println!("  Issue density: {:.2}% of lines", stats.issue_density());
}

/// Destination for an exported report: next to the scanned file, with a
/// timestamped name
pub fn export_path(scanned: &Path, timestamp: &str) -> PathBuf {
    let name = scanned
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string());
    let dir = scanned.parent().unwrap_or_else(|| Path::new("."));
    dir.join(format!("log_analysis_{name}_{timestamp}.txt"))
}

/// Plain-text report grouped by category in precedence order, with
/// remediation tips for categories that have them
pub fn grouped_report(scanned: &Path, findings: &[Finding], generated_at: &str) -> String {
    let mut out = String::new();
    out.push_str("ROM Build Log Analysis Report\n");
    out.push_str("=====================================\n");
    out.push_str(&format!("File: {}\n", scanned.display()));
    out.push_str(&format!("Analysis Date: {generated_at}\n"));
    out.push_str(&format!("Total Issues Found: {}\n", findings.len()));

    for category in Category::ALL {
        let group: Vec<&Finding> = findings.iter().filter(|f| f.category == category).collect();
        if group.is_empty() {
            continue;
        }

        out.push_str(&format!(
            "\n{} {} ({} issues)\n",
            category.icon(),
            category,
            group.len()
        ));
        out.push_str(&format!("{}\n", "-".repeat(40)));

        for finding in &group {
            out.push_str(&format!("Line {}: {}\n", finding.line_number, finding.message));
            out.push_str(&format!("    {}\n\n", finding.raw_text));
        }

        let tips = tips_for(category);
        if !tips.is_empty() {
            out.push_str("Suggested fixes:\n");
            for tip in tips {
                out.push_str(&format!("  - {tip}\n"));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use romscope_engine::Origin;

    #[test]
    fn test_export_path_is_timestamped_next_to_file() {
        let path = export_path(Path::new("/logs/build.log"), "20240101_120000");
        assert_eq!(
            path,
            Path::new("/logs/log_analysis_build.log_20240101_120000.txt")
        );
    }

    #[test]
    fn test_grouped_report_orders_by_precedence() {
        let findings = vec![
            Finding::new(10, "warning: deprecated", Category::Warning, Origin::Standard),
            Finding::new(5, "FATAL: crash", Category::Critical, Origin::Standard),
            Finding::new(
                7,
                "vendor/proprietary-files.txt not found",
                Category::VendorBlobs,
                Origin::ContextSpecific,
            ),
        ];
        let report = grouped_report(Path::new("build.log"), &findings, "2024-01-01 12:00:00");

        let critical = report.find("CRITICAL (1 issues)").unwrap();
        let vendor = report.find("VENDOR_BLOBS (1 issues)").unwrap();
        let warning = report.find("WARNING (1 issues)").unwrap();
        assert!(critical < vendor && vendor < warning);
        // Vendor blob findings carry remediation tips
        assert!(report.contains("Run ./extract-files.sh from device directory"));
    }
}
