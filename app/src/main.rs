// In app/src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use llm_client::LlmClient;
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

mod analyzer;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Computes trading performance statistics from a trade history and has an LLM write them up."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyzes a trade file and prints the report as JSON.
    Analyze {
        /// Path to the trades CSV file.
        path: PathBuf,

        /// Print the JSON on a single line.
        #[arg(long)]
        compact: bool,
    },

    /// Analyzes a trade file and prints an LLM-written performance review.
    Report {
        /// Path to the trades CSV file.
        path: PathBuf,

        /// Also write the analytics JSON to this file.
        #[arg(long)]
        json_out: Option<PathBuf>,
    },
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting trade analytics");

    match cli.command {
        Commands::Analyze { path, compact } => {
            let report = analyzer::run_analysis(&path, &settings.analysis)?;
            let json = if compact {
                serde_json::to_string(&report)?
            } else {
                serde_json::to_string_pretty(&report)?
            };
            println!("{}", json);
        }
        Commands::Report { path, json_out } => {
            let report = analyzer::run_analysis(&path, &settings.analysis)?;

            if let Some(out) = json_out {
                let json = serde_json::to_string_pretty(&report)?;
                std::fs::write(&out, json)
                    .with_context(|| format!("Failed to write {}", out.display()))?;
                tracing::info!(path = %out.display(), "Analytics JSON written.");
            }

            let client = LlmClient::new(&settings.llm)?
                .with_low_sample_threshold(settings.analysis.low_sample_threshold);
            let text = client.generate_report(&report).await?;

            println!("{}", "=".repeat(80));
            println!("LLM PERFORMANCE REPORT");
            println!("{}\n", "=".repeat(80));
            println!("{}", text);
        }
    }

    tracing::info!("Trade analytics has finished successfully.");

    Ok(())
}

/// Installs the fmt subscriber on stderr so stdout carries only the report.
fn init_tracing(log_level: &str) {
    let level = log_level.parse::<tracing::Level>().unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}
