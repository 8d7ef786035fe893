//! JSON output for the article list.
//!
//! The data file is a top-level array of [`Article`] objects, pretty-printed
//! with a fixed indent. Non-ASCII text is written literally and fields keep
//! their declaration order, so consecutive runs diff cleanly.

use crate::error::{Error, Result};
use crate::models::Article;
use crate::utils::write_atomic;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Serialize `articles` as a pretty JSON array using `indent` spaces per level.
///
/// The same text is used for the data file and for the literal embedded in
/// the page.
pub fn to_pretty_json(articles: &[Article], indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    articles.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| Error::Config(format!("serializer produced invalid utf-8: {e}")))
}

/// Full contents of the data file: the pretty array plus a trailing newline.
pub fn render_file(articles: &[Article], indent: usize) -> Result<String> {
    let mut json = to_pretty_json(articles, indent)?;
    json.push('\n');
    Ok(json)
}

/// Write `articles` to `path`, replacing any previous file.
#[instrument(level = "info", skip(articles), fields(path = %path.display(), count = articles.len()))]
pub async fn write_articles(path: &Path, articles: &[Article], indent: usize) -> Result<()> {
    let json = render_file(articles, indent)?;

    info!("Writing JSON");
    write_atomic(path, json.as_bytes()).await?;
    info!("Wrote JSON data file");
    Ok(())
}

/// Read a previously written data file.
#[instrument(level = "debug", fields(path = %path.display()))]
pub async fn read_articles(path: &Path) -> Result<Vec<Article>> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use tempfile::TempDir;

    fn article(title: &str, category: Category) -> Article {
        Article {
            title: title.to_string(),
            description: "描述 with \"quotes\" and ];".to_string(),
            category,
            source: "HRoot".to_string(),
            link: "https://www.hroot.com/".to_string(),
            week: "2024年第3周".to_string(),
            date: "2024年01月15日".to_string(),
        }
    }

    #[test]
    fn test_pretty_json_indent() {
        let json = to_pretty_json(&[article("标题", Category::Culture)], 2).unwrap();
        assert!(json.starts_with("[\n  {\n    \"title\": \"标题\","), "{json}");
        assert!(json.ends_with("}\n]"));

        let wide = to_pretty_json(&[article("标题", Category::Culture)], 10).unwrap();
        assert!(wide.starts_with(&format!("[\n{}{{", " ".repeat(10))));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(to_pretty_json(&[], 2).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hr_news_data.json");
        let articles = vec![
            article("智能招聘", Category::TalentDevelopment),
            article("弹性福利", Category::CompensationBenefits),
            article("HRSSC", Category::SharedServices),
        ];

        write_articles(&path, &articles, 2).await.unwrap();
        let back = read_articles(&path).await.unwrap();
        assert_eq!(back, articles);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("智能招聘"));
        assert!(raw.ends_with("]\n"));
    }

    #[tokio::test]
    async fn test_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.json");
        std::fs::write(&path, "stale contents that are much longer than the new file").unwrap();

        write_articles(&path, &[], 2).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[tokio::test]
    async fn test_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.json");
        let err = write_articles(&path, &[], 2).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
