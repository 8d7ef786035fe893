//! # HR News Weekly
//!
//! Regenerates the data behind a static "AI in HR" weekly news page: a curated
//! list of articles, each filed under an HR category and stamped with the
//! current ISO week, written to a JSON file and embedded in the page itself.
//!
//! ## Usage
//!
//! ```sh
//! hr_news_weekly -j ./hr_news_data.json -p ./index.html
//! ```
//!
//! ## Architecture
//!
//! The application runs one linear pipeline:
//! 1. **Catalog load**: Built-in or YAML catalog, optionally plus scraped articles
//! 2. **Stamp**: Week label and Monday date for the current ISO week
//! 3. **JSON write**: Atomic replacement of the data file
//! 4. **HTML patch**: Atomic replacement of the page's embedded array literal

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod catalog;
mod classifier;
mod cli;
mod error;
mod models;
mod outputs;
mod runner;
mod scrapers;
mod utils;
mod week;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("hr_news_weekly starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    let config = args.into_config();

    match runner::run(&config).await {
        Ok(summary) => {
            let elapsed = start_time.elapsed();
            info!(
                ?elapsed,
                articles = summary.articles.len(),
                week = %summary.stamp.week,
                "Execution complete"
            );

            let verb = if config.check { "would update" } else { "updated" };
            println!(
                "{} articles for {} ({})",
                summary.articles.len(),
                summary.stamp.week,
                summary.stamp.date
            );
            for (category, count) in &summary.per_category {
                println!("  {category}: {count}");
            }
            if summary.json_changed {
                println!("{verb} {}", config.json_output.display());
            }
            if summary.html_changed {
                println!("{verb} {}", config.html_file.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(stage = %e.stage, error = %e.source, "Run aborted");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
