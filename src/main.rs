use std::collections::HashSet;
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;

use romscope_engine::{
    Category, ERROR_KEYWORDS, FindingFilter, RuleCatalog, ScanReport, ScanStats, Scanner,
    scan_keywords,
};

mod report;

/// Romscope - triage Android ROM build logs from the command line
#[derive(Parser, Debug)]
#[command(name = "romscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log file(s) to analyze
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Keep only findings whose line contains this substring
    #[arg(long, value_name = "SUBSTRING")]
    pattern: Option<String>,

    /// Keep only this category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// Keep only failure categories (drop warnings, info, success markers)
    #[arg(long)]
    fail_only: bool,

    /// Plain keyword triage: print every error-like line, no categories
    #[arg(long)]
    keywords: bool,

    /// Load detection rules from a TOML file instead of the builtin set
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Also write a grouped report file next to each scanned log
    #[arg(long)]
    export: bool,

    /// Print a per-category summary after each file
    #[arg(long)]
    stats: bool,

    /// Classify lines across worker threads
    #[arg(long)]
    parallel: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if args.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let catalog = match &args.rules {
        Some(path) => RuleCatalog::from_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display()))?,
        None => RuleCatalog::builtin().context("failed to build the builtin rule catalog")?,
    };

    let filter = build_filter(&args)?;
    let scanner = Scanner::new(&catalog);

    let mut failed_files = 0usize;
    for path in &args.files {
        let outcome = if args.keywords {
            scan_keyword_mode(path, args.pattern.as_deref())
        } else {
            scan_categorized(&args, &scanner, &filter, path)
        };

        if let Err(e) = outcome {
            failed_files += 1;
            eprintln!("Error: {:#}", e);
        }
    }

    if failed_files > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn build_filter(args: &Args) -> Result<FindingFilter> {
    let mut filter = FindingFilter::new();

    if !args.categories.is_empty() {
        let mut selected = HashSet::new();
        for name in &args.categories {
            let category = Category::from_name(name).with_context(|| {
                let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown category '{}' (valid: {})", name, valid.join(", "))
            })?;
            selected.insert(category);
        }
        filter = filter.with_categories(selected);
    }

    if args.fail_only {
        filter = filter.fail_only();
    }

    if let Some(pattern) = &args.pattern {
        filter = filter.with_pattern(pattern.clone());
    }

    Ok(filter)
}

/// Plain error/not-error triage over one file
fn scan_keyword_mode(path: &PathBuf, pattern: Option<&str>) -> Result<()> {
    let mut hits = scan_keywords(path, ERROR_KEYWORDS)
        .with_context(|| format!("failed to scan {}", path.display()))?;
    if let Some(pattern) = pattern {
        hits.retain(|(_, line)| line.contains(pattern));
    }

    println!("{}", format!("==> {}", path.display()).bold());
    if hits.is_empty() {
        println!("No error-related patterns found.");
        return Ok(());
    }

    println!("Found {} potential error(s):", hits.len());
    for (line_number, line) in &hits {
        println!("{} {}", format!("Line {}:", line_number).bold(), line);
    }
    Ok(())
}

/// Full categorized scan over one file
fn scan_categorized(
    args: &Args,
    scanner: &Scanner<'_>,
    filter: &FindingFilter,
    path: &PathBuf,
) -> Result<()> {
    let report = if args.parallel {
        scanner.scan_parallel(path)
    } else {
        scanner.scan(path)
    }
    .with_context(|| format!("failed to scan {}", path.display()))?;

    let findings = filter.apply(&report.findings);

    match args.format {
        Format::Text => {
            println!("{}", format!("==> {}", path.display()).bold());
            if findings.is_empty() {
                println!("No issues found.");
            }
            for finding in &findings {
                report::print_finding(finding);
            }
            if !filter.is_empty() {
                println!(
                    "Showing {} of {} issues",
                    findings.len(),
                    report.findings.len()
                );
            }
        }
        Format::Json => print_json(&report, &findings)?,
    }

    if args.stats {
        report::print_stats(&ScanStats::from_report(&report));
    }

    if args.export {
        let timestamp = chrono::Local::now();
        let dest = report::export_path(path, &timestamp.format("%Y%m%d_%H%M%S").to_string());
        let text = report::grouped_report(
            path,
            &findings,
            &timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
        fs::write(&dest, text)
            .with_context(|| format!("failed to write report to {}", dest.display()))?;
        println!("Report written to {}", dest.display());
    }

    Ok(())
}

fn print_json(report: &ScanReport, findings: &[romscope_engine::Finding]) -> Result<()> {
    let doc = serde_json::json!({
        "file": report.path.display().to_string(),
        "total_lines": report.total_lines,
        "skipped_lines": report.skipped_lines,
        "findings": findings,
    });
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
