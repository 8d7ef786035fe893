//! The generation pipeline.
//!
//! One run is a fixed, linear sequence:
//! 1. **catalog load**: keyword table + curated catalog, plus scraped articles
//!    when enabled (scraping never aborts the run)
//! 2. **stamp**: attach the week label and Monday date to every article
//! 3. **JSON write**: replace the data file
//! 4. **HTML patch**: replace the page's embedded array
//!
//! The first failing stage aborts the run; its error carries the stage name.

use crate::catalog;
use crate::classifier::KeywordTable;
use crate::error::{Stage, StageContext, StageError};
use crate::models::{Article, Category};
use crate::outputs::{html, json};
use crate::scrapers;
use crate::week::{self, WeekStamp};
use chrono::NaiveDate;
use itertools::Itertools;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument};

/// Ordering of records in both outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOrder {
    /// Catalog order, followed by scraped articles in scrape order.
    Insertion,
    /// By `(week, category label)` descending; ties keep insertion order.
    WeekCategoryDesc,
}

/// Everything a run needs; built from the CLI.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub json_output: PathBuf,
    pub html_file: PathBuf,
    /// Identifier of the `const` array in the page.
    pub variable: String,
    pub keywords: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    /// Pinned run date; today when `None`.
    pub date: Option<NaiveDate>,
    pub order: RecordOrder,
    pub json_indent: usize,
    pub html_indent: usize,
    pub scrape: bool,
    /// Compute outputs without writing them.
    pub check: bool,
}

impl RunConfig {
    /// Defaults matching the CLI, for the given output paths.
    pub fn new(json_output: impl Into<PathBuf>, html_file: impl Into<PathBuf>) -> Self {
        RunConfig {
            json_output: json_output.into(),
            html_file: html_file.into(),
            variable: "defaultData".to_string(),
            keywords: None,
            catalog: None,
            date: None,
            order: RecordOrder::Insertion,
            json_indent: 2,
            html_indent: 2,
            scrape: false,
            check: false,
        }
    }
}

/// What a run produced.
#[derive(Debug)]
pub struct RunSummary {
    pub articles: Vec<Article>,
    pub stamp: WeekStamp,
    /// Article count per category, in [`Category::ALL`] order.
    pub per_category: Vec<(Category, usize)>,
    pub json_changed: bool,
    pub html_changed: bool,
}

/// Apply `order` to the stamped articles.
pub fn order_articles(articles: Vec<Article>, order: RecordOrder) -> Vec<Article> {
    match order {
        RecordOrder::Insertion => articles,
        RecordOrder::WeekCategoryDesc => articles
            .into_iter()
            .sorted_by(|a, b| {
                (b.week.as_str(), b.category.label()).cmp(&(a.week.as_str(), a.category.label()))
            })
            .collect(),
    }
}

fn category_counts(articles: &[Article]) -> Vec<(Category, usize)> {
    let counts = articles.iter().counts_by(|a| a.category);
    Category::ALL
        .into_iter()
        .map(|c| (c, counts.get(&c).copied().unwrap_or(0)))
        .collect()
}

/// Run the whole pipeline once.
#[instrument(level = "info", skip_all, fields(json = %config.json_output.display(), html = %config.html_file.display(), check = config.check))]
pub async fn run(config: &RunConfig) -> Result<RunSummary, StageError> {
    // ---- catalog load ----
    let table = KeywordTable::load(config.keywords.as_deref())
        .await
        .stage(Stage::CatalogLoad)?;
    let mut drafts = catalog::load(config.catalog.as_deref(), &table)
        .await
        .stage(Stage::CatalogLoad)?;

    if config.scrape {
        info!(stage = %Stage::Fetch, "Scraping optional sources");
        let scraped = scrapers::fetch_all(&table).await;
        drafts.extend(scraped);
    }
    info!(stage = %Stage::CatalogLoad, count = drafts.len(), "Articles assembled");

    // ---- stamp ----
    let stamp = match config.date {
        Some(date) => week::stamp_for(date),
        None => week::current(),
    }
    .stage(Stage::Stamp)?;
    let articles = order_articles(
        drafts.iter().map(|d| d.stamp(&stamp)).collect(),
        config.order,
    );
    info!(stage = %Stage::Stamp, week = %stamp.week, date = %stamp.date, "Articles stamped");

    // ---- JSON write ----
    let rendered = json::render_file(&articles, config.json_indent).stage(Stage::JsonWrite)?;
    let previous = fs::read_to_string(&config.json_output).await.ok();
    let json_changed = previous.as_deref() != Some(rendered.as_str());
    if config.check {
        match json::read_articles(&config.json_output).await {
            Ok(existing) => info!(existing = existing.len(), new = articles.len(), changed = json_changed, "JSON check"),
            Err(e) => debug!(error = %e, "No readable JSON data file yet"),
        }
    } else {
        json::write_articles(&config.json_output, &articles, config.json_indent)
            .await
            .stage(Stage::JsonWrite)?;
    }

    // ---- HTML patch ----
    let literal = json::to_pretty_json(&articles, config.html_indent).stage(Stage::HtmlPatch)?;
    let html_changed = if config.check {
        html::plan(&config.html_file, &config.variable, &literal)
            .await
            .stage(Stage::HtmlPatch)?
            .changed()
    } else {
        html::patch_file(&config.html_file, &config.variable, &literal)
            .await
            .stage(Stage::HtmlPatch)?
    };

    let per_category = category_counts(&articles);
    info!(
        count = articles.len(),
        json_changed,
        html_changed,
        "Run complete"
    );

    Ok(RunSummary {
        articles,
        stamp,
        per_category,
        json_changed,
        html_changed,
    })
}
