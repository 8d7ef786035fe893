//! Best-effort scrapers for extra articles.
//!
//! Scraping is opt-in (`--scrape`) and never fatal: a source that errors or
//! yields nothing is logged as [`Error::DataSourceUnavailable`] and the run
//! carries on with the curated catalog alone.
//!
//! # Supported Sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | 36Kr | [`kr36`] | search result pages, first 3 links per term |
//! | Zhihu | [`zhihu`] | search result page, up to 3 headings |
//!
//! Each module splits fetching from a pure `parse_*` function so the link
//! filters can be tested against static HTML.

pub mod kr36;
pub mod zhihu;

use crate::classifier::KeywordTable;
use crate::error::{Error, Result};
use crate::models::ArticleDraft;
use crate::utils::truncate_for_log;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

const BROWSER_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Kr36,
    Zhihu,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Kr36, Source::Zhihu];

    pub fn name(self) -> &'static str {
        match self {
            Source::Kr36 => "36kr",
            Source::Zhihu => "zhihu",
        }
    }

    async fn fetch(self, client: &Client, table: &KeywordTable) -> Result<Vec<ArticleDraft>> {
        match self {
            Source::Kr36 => kr36::fetch_articles(client, table).await,
            Source::Zhihu => zhihu::fetch_articles(client, table).await,
        }
    }
}

/// HTTP client with browser-like headers and a short timeout.
pub fn build_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_UA));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("zh-CN,zh;q=0.9,en;q=0.8"));

    Ok(Client::builder()
        .default_headers(headers)
        .timeout(REQUEST_TIMEOUT)
        .build()?)
}

/// GET `url` and return the body of a successful response.
pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(%url, bytes = body.len(), "Fetched page");
    Ok(body)
}

fn require_results(source: Source, found: Vec<ArticleDraft>) -> Result<Vec<ArticleDraft>> {
    if found.is_empty() {
        Err(Error::DataSourceUnavailable {
            source_name: source.name().to_string(),
            reason: "no matching articles".to_string(),
        })
    } else {
        Ok(found)
    }
}

/// Query every source in turn and merge what they return.
///
/// Never fails; unavailable sources contribute nothing.
#[instrument(level = "info", skip_all)]
pub async fn fetch_all(table: &KeywordTable) -> Vec<ArticleDraft> {
    let client = match build_client() {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Could not build HTTP client; skipping scraping");
            return Vec::new();
        }
    };

    let mut drafts = Vec::new();
    for source in Source::ALL {
        let outcome = source
            .fetch(&client, table)
            .await
            .map_err(|e| match e {
                unavailable @ Error::DataSourceUnavailable { .. } => unavailable,
                other => Error::DataSourceUnavailable {
                    source_name: source.name().to_string(),
                    reason: other.to_string(),
                },
            })
            .and_then(|found| require_results(source, found));

        match outcome {
            Ok(found) => {
                for draft in &found {
                    debug!(source = source.name(), title = %truncate_for_log(&draft.title, 30), "Scraped article");
                }
                info!(source = source.name(), count = found.len(), "Scraped articles");
                drafts.extend(found);
            }
            Err(e) => warn!(error = %e, "Continuing with curated catalog only"),
        }
    }
    info!(count = drafts.len(), "Finished scraping");
    drafts
}
