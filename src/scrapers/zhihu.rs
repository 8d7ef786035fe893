//! Zhihu search scraper.

use crate::classifier::KeywordTable;
use crate::error::{Error, Result};
use crate::models::ArticleDraft;
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{info, instrument};
use url::Url;

const BASE_URL: &str = "https://www.zhihu.com";
const SEARCH_QUERY: &str = "AI HR 人力资源";
const ELEMENTS_SCANNED: usize = 20;
const MAX_RESULTS: usize = 3;
const MIN_TITLE_CHARS: usize = 15;
const TOPIC_MARKERS: [&str; 4] = ["AI", "人工智能", "HR", "人力资源"];
const DESCRIPTION: &str = "分享AI技术在HR领域的应用经验和见解";
const SOURCE_NAME: &str = "知乎";

static CANDIDATE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, a").expect("static selector parses"));
static ANCHOR_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("static selector parses"));

fn link_of(element: ElementRef<'_>) -> Option<&str> {
    let href = if element.value().name() == "a" {
        element.value().attr("href")
    } else {
        element
            .select(&ANCHOR_SELECTOR)
            .next()
            .and_then(|a| a.value().attr("href"))
    };
    href.filter(|h| !h.trim().is_empty())
}

/// Extract up to [`MAX_RESULTS`] articles from a search result page.
///
/// Headings and anchors are scanned in document order; a heading uses the
/// first link inside it.
pub fn parse_search_page(html: &str, base: &Url, table: &KeywordTable) -> Vec<ArticleDraft> {
    let document = Html::parse_document(html);
    document
        .select(&CANDIDATE_SELECTOR)
        .take(ELEMENTS_SCANNED)
        .filter_map(|element| {
            let title = element.text().collect::<String>().trim().to_string();
            let href = link_of(element)?;
            if title.chars().count() <= MIN_TITLE_CHARS
                || !TOPIC_MARKERS.iter().any(|m| title.contains(m))
            {
                return None;
            }
            let link = base.join(href).ok()?;
            Some(ArticleDraft {
                category: table.classify(&title, ""),
                title,
                description: DESCRIPTION.to_string(),
                source: SOURCE_NAME.to_string(),
                link: link.to_string(),
            })
        })
        .take(MAX_RESULTS)
        .collect()
}

#[instrument(level = "info", skip_all)]
pub async fn fetch_articles(client: &Client, table: &KeywordTable) -> Result<Vec<ArticleDraft>> {
    let base = Url::parse(BASE_URL).map_err(|e| Error::Config(e.to_string()))?;
    let mut url = base.join("/search").map_err(|e| Error::Config(e.to_string()))?;
    url.query_pairs_mut().append_pair("q", SEARCH_QUERY);

    let html = super::get_text(client, url.as_str()).await?;
    let found = parse_search_page(&html, &base, table);
    info!(count = found.len(), "Searched zhihu");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_parse_headings_and_anchors() {
        let html = r#"<html><body>
            <h2><a href="/question/1">HR如何用AI做好员工培训和学习发展规划</a></h2>
            <a href="https://zhuanlan.zhihu.com/p/2">人工智能正在改变企业的薪酬福利设计方式</a>
            <a href="/p/3">太短的AI标题</a>
            <h2>没有链接的人工智能人力资源标题文字很长</h2>
            <a href="/p/4">一个与主题完全无关但是标题足够长的回答内容</a>
        </body></html>"#;
        let base = Url::parse(BASE_URL).unwrap();
        let table = KeywordTable::builtin().unwrap();

        let found = parse_search_page(html, &base, &table);
        // The h2 and the anchor inside it both qualify.
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].link, "https://www.zhihu.com/question/1");
        assert_eq!(found[0].category, Category::TalentDevelopment);
        assert_eq!(found[1].link, "https://www.zhihu.com/question/1");
        assert_eq!(found[2].link, "https://zhuanlan.zhihu.com/p/2");
        assert_eq!(found[2].category, Category::CompensationBenefits);
        assert!(found.iter().all(|d| d.source == "知乎"));
    }

    #[test]
    fn test_parse_caps_results() {
        let item = r#"<a href="/p/x">人工智能如何帮助HR团队提升招聘效率与质量</a>"#;
        let html = item.repeat(6);
        let base = Url::parse(BASE_URL).unwrap();
        let table = KeywordTable::builtin().unwrap();
        assert_eq!(parse_search_page(&html, &base, &table).len(), MAX_RESULTS);
    }

    #[test]
    fn test_parse_skips_empty_links() {
        let html = r#"<html><body>
            <a href="">人工智能如何帮助HR团队提升招聘效率与质量</a>
            <h2><a href="  ">HR如何用AI做好员工培训和学习发展规划</a></h2>
            <a href="/p/7">人工智能正在改变企业的薪酬福利设计方式</a>
        </body></html>"#;
        let base = Url::parse(BASE_URL).unwrap();
        let table = KeywordTable::builtin().unwrap();

        let found = parse_search_page(html, &base, &table);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].link, "https://www.zhihu.com/p/7");
    }
}
