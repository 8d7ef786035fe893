//! Command-line interface definitions for the weekly HR news generator.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Paths and the patched identifier can also come from environment variables.

use crate::runner::{RecordOrder, RunConfig};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Ordering of records in the outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Catalog order, then scraped articles
    Insertion,
    /// Week, then category label, both descending
    WeekCategory,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Regenerate hr_news_data.json and patch index.html in the current directory
/// hr_news_weekly
///
/// # Patch a different page whose data constant is `embeddedData`
/// hr_news_weekly -p ai_hr_weekly.html -v embeddedData --order week-category
///
/// # Pin the week and see what would change without writing
/// hr_news_weekly --date 2024-01-15 --check
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the JSON data file to (re)write
    #[arg(short, long, env = "HR_NEWS_JSON", default_value = "hr_news_data.json")]
    pub json_output: PathBuf,

    /// HTML page holding the embedded article array
    #[arg(short = 'p', long, env = "HR_NEWS_HTML", default_value = "index.html")]
    pub html_file: PathBuf,

    /// Name of the `const` holding the array in the page
    #[arg(short, long, env = "HR_NEWS_VARIABLE", default_value = "defaultData")]
    pub variable: String,

    /// YAML keyword table replacing the built-in classifier rules
    #[arg(short, long, env = "HR_NEWS_KEYWORDS")]
    pub keywords: Option<PathBuf>,

    /// YAML catalog replacing the built-in curated list
    #[arg(short, long, env = "HR_NEWS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Stamp articles as of this date (YYYY-MM-DD) instead of today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Ordering of the written records
    #[arg(long, value_enum, default_value_t = OrderArg::Insertion)]
    pub order: OrderArg,

    /// Spaces per indent level in the JSON file
    #[arg(long, default_value_t = 2)]
    pub json_indent: usize,

    /// Spaces per indent level in the embedded array
    #[arg(long, default_value_t = 2)]
    pub html_indent: usize,

    /// Also try scraping 36Kr and Zhihu (best effort)
    #[arg(long)]
    pub scrape: bool,

    /// Compute everything and report what would change, but write nothing
    #[arg(long)]
    pub check: bool,
}

impl Cli {
    pub fn into_config(self) -> RunConfig {
        let mut config = RunConfig::new(self.json_output, self.html_file);
        config.variable = self.variable;
        config.keywords = self.keywords;
        config.catalog = self.catalog;
        config.date = self.date;
        config.order = match self.order {
            OrderArg::Insertion => RecordOrder::Insertion,
            OrderArg::WeekCategory => RecordOrder::WeekCategoryDesc,
        };
        config.json_indent = self.json_indent;
        config.html_indent = self.html_indent;
        config.scrape = self.scrape;
        config.check = self.check;
        config
    }
}
