//! Terminal output utilities.
//!
//! Provides the end-of-run summary and failure line.

use crate::error::ListError;
use crate::RunSummary;
use colored::Colorize;

/// Format a count with `,` thousands separators.
///
/// # Examples
/// ```
/// use ito_iplist::output::format_count;
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(summary: &RunSummary) {
    let report = &summary.report;
    if report.invalid > 0 {
        println!(
            "#{}# Skipped {} invalid subnet entries.",
            "WARN".on_yellow(),
            format_count(report.invalid)
        );
    }
    if report.oversized > 0 {
        println!(
            "#{}# Skipped {} networks above the host limit.",
            "WARN".on_yellow(),
            format_count(report.oversized)
        );
    }
    if let Some(delta) = summary.delta {
        println!(
            "Changes since last list: +{} -{}",
            format_count(delta.added).green(),
            format_count(delta.removed).red()
        );
    }
    println!(
        "#{}# Wrote {} IPs ({} v4, {} v6) from {} subnets to {}",
        "DONE".on_green(),
        format_count(summary.v4 + summary.v6).bold(),
        format_count(summary.v4),
        format_count(summary.v6),
        format_count(summary.subnets),
        summary.output_path.display()
    );
}

/// Print the single diagnostic line for a failed run to stderr.
pub fn print_failure(err: &ListError) {
    eprintln!("#{}# {err}", "FAILED".on_red());
}
