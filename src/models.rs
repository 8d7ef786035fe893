//! Data models for the weekly news list.
//!
//! - [`Category`]: the closed set of HR-domain labels an article is filed under
//! - [`ArticleDraft`]: an article as it comes out of the catalog or a scraper
//! - [`Article`]: a draft stamped with the run's week and date
//!
//! Field order of [`Article`] is the serialized order, so JSON output diffs
//! cleanly between runs.

use crate::week::WeekStamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The HR area an article is filed under.
///
/// Serialized as the Chinese label the page filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum Category {
    /// 薪酬福利: compensation & benefits.
    #[serde(rename = "薪酬福利")]
    CompensationBenefits,
    /// 人才发展: talent development.
    #[serde(rename = "人才发展")]
    TalentDevelopment,
    /// 组织发展: organizational development.
    #[serde(rename = "组织发展")]
    OrganizationalDevelopment,
    /// 企业文化: culture.
    #[serde(rename = "企业文化")]
    Culture,
    /// SSC: shared services center.
    #[serde(rename = "SSC")]
    SharedServices,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CompensationBenefits,
        Category::TalentDevelopment,
        Category::OrganizationalDevelopment,
        Category::Culture,
        Category::SharedServices,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::CompensationBenefits => "薪酬福利",
            Category::TalentDevelopment => "人才发展",
            Category::OrganizationalDevelopment => "组织发展",
            Category::Culture => "企业文化",
            Category::SharedServices => "SSC",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An article before the run's week/date stamp is attached.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    /// Name of the publishing outlet.
    pub source: String,
    /// Not checked for reachability.
    pub link: String,
}

impl ArticleDraft {
    /// Produce the final record for this run.
    pub fn stamp(&self, stamp: &WeekStamp) -> Article {
        Article {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category,
            source: self.source.clone(),
            link: self.link.clone(),
            week: stamp.week.clone(),
            date: stamp.date.clone(),
        }
    }
}

/// One entry of the published list, as written to JSON and embedded in the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub source: String,
    pub link: String,
    /// e.g. `2024年第3周`
    pub week: String,
    /// e.g. `2024年01月15日`
    pub date: String,
}
