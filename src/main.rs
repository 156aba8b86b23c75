use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use profilescan::api::{FakeProfileApi, ReqwestTransport};
use profilescan::charts::{platforms_chart, results_chart, ChartData};
use profilescan::config::Config;
use profilescan::cookies::StaticCookies;
use profilescan::models::{Platform, ReportOutcome, ReportRequest, ScanRequest};
use profilescan::output::terminal;
use profilescan::ui::forms::FormKind;

/// Profilescan: submit social-media profiles for fake-profile risk scoring.
///
/// Talks to a running detection server using your browser session cookies.
#[derive(Parser)]
#[command(name = "profilescan", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a profile URL for fake-profile risk
    Scan {
        /// Full profile URL (e.g. https://www.instagram.com/username)
        profile_url: String,

        /// instagram, facebook, twitter or tiktok ("auto" lets the server decide)
        #[arg(long, default_value = "auto")]
        platform: String,

        /// Extra context for the analysts
        #[arg(long, default_value = "")]
        context: String,

        /// Write the result HTML to this file instead of previewing it
        #[arg(long)]
        out: Option<String>,
    },

    /// Report a profile for abuse
    Report {
        profile_url: String,

        #[arg(long)]
        platform: String,

        /// Why the profile is being reported
        #[arg(long)]
        reason: String,
    },

    /// Fetch your scan history
    History {
        /// Write the history HTML to this file instead of previewing it
        #[arg(long)]
        out: Option<String>,
    },

    /// Show the risk band for one or more scores
    Risk {
        #[arg(required = true, allow_negative_numbers = true)]
        scores: Vec<f64>,
    },

    /// Build dashboard chart configs from precomputed chart data
    Charts {
        /// JSON file with the results breakdown (labels + datasets)
        #[arg(long)]
        results: String,

        /// JSON file with per-platform scan counts (labels + datasets)
        #[arg(long)]
        platforms: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("profilescan=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            profile_url,
            platform,
            context,
            out,
        } => {
            let config = Config::load()?;
            config.require_csrf()?;
            let api = build_api(&config)?;

            let request =
                ScanRequest::new(profile_url, Platform::parse(&platform)).with_context(context);

            info!(profile_url = %request.profile_url, platform = %request.platform, "Submitting scan");

            let spinner = spinner(FormKind::ProfileCheck.working_text());
            let result = api.detect_profile(&request).await;
            spinner.finish_and_clear();

            let html = result.context("Scan request failed")?;
            let saved = save_output(out.as_deref(), &html)?;
            terminal::display_scan_result(&request.platform, &request.profile_url, &html, saved);
        }

        Commands::Report {
            profile_url,
            platform,
            reason,
        } => {
            let config = Config::load()?;
            config.require_csrf()?;
            let api = build_api(&config)?;

            let request = ReportRequest::new(profile_url, Platform::parse(&platform), reason);
            let reply = api
                .report_profile(&request)
                .await
                .context("Report request failed")?;

            terminal::display_report_outcome(&ReportOutcome::from_value(&reply));
        }

        Commands::History { out } => {
            let config = Config::load()?;
            config.require_session()?;
            let api = build_api(&config)?;

            let html = api
                .get_scan_history()
                .await
                .context("History request failed")?;
            let saved = save_output(out.as_deref(), &html)?;
            terminal::display_history(&html, saved);
        }

        Commands::Risk { scores } => {
            println!("\n{}", "=== Risk Bands ===".bold());
            for score in scores {
                terminal::display_risk(score);
            }
        }

        Commands::Charts { results, platforms } => {
            let result_data: serde_json::Value = read_json(&results)?;
            let platform_data: ChartData = read_json(&platforms)?;

            let results_config = results_chart(&result_data);
            let platforms_config = platforms_chart(&platform_data)?;

            println!("{}", format!("// {}", profilescan::charts::RESULTS_CANVAS).dimmed());
            println!("{}", results_config.to_json()?);
            println!("{}", format!("// {}", profilescan::charts::PLATFORMS_CANVAS).dimmed());
            println!("{}", platforms_config.to_json()?);
        }
    }

    Ok(())
}

fn build_api(config: &Config) -> Result<FakeProfileApi> {
    let transport = ReqwestTransport::new(&config.base_url, Some(config.cookies.clone()))?;
    Ok(FakeProfileApi::new(
        Arc::new(transport),
        Arc::new(StaticCookies(config.cookies.clone())),
    ))
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Write `html` to `path` if given. Returns the path written.
fn save_output<'a>(path: Option<&'a str>, html: &str) -> Result<Option<&'a str>> {
    if let Some(path) = path {
        std::fs::write(path, html).with_context(|| format!("Failed to write {path}"))?;
    }
    Ok(path)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse chart data in {path}"))
}
