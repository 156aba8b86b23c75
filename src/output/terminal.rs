// Colored terminal output for the CLI.
//
// main.rs delegates all printing here so the command handlers stay about
// requests and responses.

use colored::Colorize;

use crate::format::{format_platform, format_risk_score, RiskBand};
use crate::models::{Platform, ReportOutcome};

/// Characters of HTML shown when a response isn't written to a file.
const HTML_PREVIEW_CHARS: usize = 600;

/// Show a scan's HTML result, or where it was saved.
pub fn display_scan_result(
    platform: &Platform,
    profile_url: &str,
    html: &str,
    saved_to: Option<&str>,
) {
    println!(
        "\n{}",
        format!(
            "=== Scan of {} profile ===",
            format_platform(platform.as_str())
        )
        .bold()
    );
    println!("  URL: {profile_url}");
    display_html(html, saved_to);
}

/// Show the scan-history fragment, or where it was saved.
pub fn display_history(html: &str, saved_to: Option<&str>) {
    println!("\n{}", "=== Scan History ===".bold());
    display_html(html, saved_to);
}

fn display_html(html: &str, saved_to: Option<&str>) {
    println!("  Response: {} bytes of HTML", html.len());
    match saved_to {
        Some(path) => println!("  Saved to: {}", path.cyan()),
        None => {
            println!();
            println!("{}", super::truncate_chars(html.trim(), HTML_PREVIEW_CHARS).dimmed());
        }
    }
}

/// Show what the server said about a filed report.
pub fn display_report_outcome(outcome: &ReportOutcome) {
    match outcome {
        ReportOutcome::Filed { report_id } => match report_id {
            Some(id) => println!("{} Report filed (id {id})", "ok".green().bold()),
            None => println!("{} Report filed", "ok".green().bold()),
        },
        ReportOutcome::Rejected { message } => {
            println!("{} Report rejected: {message}", "!!".red().bold())
        }
        ReportOutcome::Other { status } => println!(
            "{} Unexpected report status: {}",
            "?".yellow(),
            status.as_deref().unwrap_or("<missing>")
        ),
    }
}

/// Show the band a score falls into.
pub fn display_risk(score: f64) {
    let label = format_risk_score(score);
    let band = RiskBand::from_score(score);
    println!(
        "  Score {:>6.1}  {}  ({})",
        score,
        colorize_band(band, label.text),
        label.class.dimmed()
    );
}

fn colorize_band(band: RiskBand, text: &str) -> colored::ColoredString {
    match band {
        RiskBand::High => text.red().bold(),
        RiskBand::Medium => text.yellow(),
        RiskBand::Low => text.green(),
    }
}
