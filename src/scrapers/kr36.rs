//! 36Kr search scraper.
//!
//! Runs a handful of AI + HR search terms against 36Kr and keeps the first
//! few links per result page whose text looks like an AI headline.

use crate::classifier::KeywordTable;
use crate::error::{Error, Result};
use crate::models::ArticleDraft;
use futures::stream::{self, StreamExt};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument};
use url::Url;

const BASE_URL: &str = "https://www.36kr.com";
const SEARCH_TERMS: [&str; 3] = ["人工智能 HR", "AI 人力资源", "ChatGPT HR"];
const LINKS_PER_PAGE: usize = 3;
const MIN_TITLE_CHARS: usize = 10;
const PAUSE_BETWEEN_TERMS: Duration = Duration::from_secs(2);
const DESCRIPTION: &str = "探讨AI技术在人力资源领域的创新应用和实践案例";
const SOURCE_NAME: &str = "36氪";

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector parses"));

fn search_url(term: &str) -> String {
    format!("{}/search/articles/{}", BASE_URL, urlencoding::encode(term))
}

fn looks_relevant(title: &str) -> bool {
    title.chars().count() > MIN_TITLE_CHARS
        && (title.to_lowercase().contains("ai") || title.contains("人工智能"))
}

/// Extract candidate articles from one search result page.
///
/// Only the first [`LINKS_PER_PAGE`] links on the page are considered.
pub fn parse_search_page(html: &str, base: &Url, table: &KeywordTable) -> Vec<ArticleDraft> {
    let document = Html::parse_document(html);
    document
        .select(&LINK_SELECTOR)
        .take(LINKS_PER_PAGE)
        .filter_map(|element| {
            let title = element.text().collect::<String>().trim().to_string();
            if !looks_relevant(&title) {
                return None;
            }
            let href = element.value().attr("href").filter(|h| !h.trim().is_empty())?;
            let link = base.join(href).ok()?;
            Some(ArticleDraft {
                category: table.classify(&title, ""),
                title,
                description: DESCRIPTION.to_string(),
                source: SOURCE_NAME.to_string(),
                link: link.to_string(),
            })
        })
        .collect()
}

/// Search every term in turn. A failed term is logged and skipped.
#[instrument(level = "info", skip_all)]
pub async fn fetch_articles(client: &Client, table: &KeywordTable) -> Result<Vec<ArticleDraft>> {
    let base = Url::parse(BASE_URL).map_err(|e| Error::Config(e.to_string()))?;

    let pages: Vec<Vec<ArticleDraft>> = stream::iter(SEARCH_TERMS)
        .then(|term| {
            let base = &base;
            async move {
                let url = search_url(term);
                match super::get_text(client, &url).await {
                    Ok(html) => {
                        let found = parse_search_page(&html, base, table);
                        info!(%term, count = found.len(), "Searched 36kr");
                        sleep(PAUSE_BETWEEN_TERMS).await;
                        found
                    }
                    Err(e) => {
                        error!(%term, error = %e, "36kr search failed");
                        Vec::new()
                    }
                }
            }
        })
        .collect()
        .await;

    Ok(pages.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn base() -> Url {
        Url::parse(BASE_URL).unwrap()
    }

    #[test]
    fn test_search_url_is_encoded() {
        assert_eq!(
            search_url("AI 人力资源"),
            "https://www.36kr.com/search/articles/AI%20%E4%BA%BA%E5%8A%9B%E8%B5%84%E6%BA%90"
        );
    }

    #[test]
    fn test_parse_keeps_relevant_links() {
        let html = r#"<html><body>
            <a href="/p/1">AI如何重塑企业薪酬管理体系的未来</a>
            <a href="/p/2">短标题AI</a>
            <a href="https://36kr.com/p/3">人工智能时代的企业组织变革之路</a>
            <a href="/p/4">AI招聘工具的十个落地案例与经验</a>
        </body></html>"#;
        let table = KeywordTable::builtin().unwrap();

        let found = parse_search_page(html, &base(), &table);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].link, "https://www.36kr.com/p/1");
        assert_eq!(found[0].category, Category::CompensationBenefits);
        assert_eq!(found[0].source, "36氪");
        assert_eq!(found[1].link, "https://36kr.com/p/3");
        assert_eq!(found[1].category, Category::OrganizationalDevelopment);
    }

    #[test]
    fn test_parse_requires_ai_mention() {
        let html = r#"<a href="/p/9">一篇与技术无关的人力资源管理长文章</a>"#;
        let table = KeywordTable::builtin().unwrap();
        assert!(parse_search_page(html, &base(), &table).is_empty());
    }

    #[test]
    fn test_parse_skips_empty_links() {
        let html = r#"<a href="">AI如何重塑企业薪酬管理体系的未来</a><a href="/p/5">人工智能时代的企业组织变革之路</a>"#;
        let table = KeywordTable::builtin().unwrap();

        let found = parse_search_page(html, &base(), &table);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].link, "https://www.36kr.com/p/5");
    }
}
