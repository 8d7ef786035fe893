//! Keyword-based category classification.
//!
//! Matching rules live in a [`KeywordTable`], loaded from YAML rather than
//! written as conditionals, so the rule set can be audited and extended
//! without touching [`KeywordTable::classify`]. The built-in table is
//! `config/keywords.yaml`, embedded at compile time.
//!
//! # Algorithm
//!
//! 1. Join title and description with a space and lowercase the result.
//! 2. Walk the rules in order; return the category of the first rule that has
//!    any keyword as a substring.
//! 3. Otherwise return the table's default category.

use crate::error::{Error, Result};
use crate::models::Category;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument};

const BUILTIN_TABLE: &str = include_str!("../config/keywords.yaml");
const BUILTIN_ORIGIN: &str = "<builtin>/config/keywords.yaml";

/// One priority level of the table.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// Ordered keyword rules plus the fallback category.
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordTable {
    /// Revision of the rule set, logged with each run.
    pub version: u32,
    pub default: Category,
    pub rules: Vec<KeywordRule>,
}

impl KeywordTable {
    /// The table shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_TABLE, Path::new(BUILTIN_ORIGIN))
    }

    /// Parse and validate a table. `origin` is only used in error messages.
    pub fn from_yaml_str(text: &str, origin: &Path) -> Result<Self> {
        let table: KeywordTable = serde_yaml::from_str(text).map_err(|source| Error::Yaml {
            path: origin.to_path_buf(),
            source,
        })?;
        table.normalized()
    }

    /// Load from `path`, or fall back to [`KeywordTable::builtin`].
    #[instrument(level = "info")]
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        let table = match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .await
                    .map_err(|e| Error::io(path, e))?;
                Self::from_yaml_str(&text, path)?
            }
            None => Self::builtin()?,
        };
        info!(
            version = table.version,
            rules = table.rules.len(),
            default = %table.default,
            "Loaded keyword table"
        );
        Ok(table)
    }

    fn normalized(mut self) -> Result<Self> {
        let mut seen = HashSet::new();
        for rule in &mut self.rules {
            if !seen.insert(rule.category) {
                return Err(Error::Config(format!(
                    "category {} has more than one keyword rule",
                    rule.category
                )));
            }
            for keyword in &mut rule.keywords {
                let trimmed = keyword.trim();
                if trimmed.is_empty() {
                    return Err(Error::Config(format!(
                        "empty keyword in rule for {}",
                        rule.category
                    )));
                }
                *keyword = trimmed.to_lowercase();
            }
        }
        Ok(self)
    }

    /// Pick the category for an article.
    pub fn classify(&self, title: &str, description: &str) -> Category {
        let text = format!("{title} {description}").to_lowercase();
        let hit = self
            .rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| text.contains(kw.as_str())));

        match hit {
            Some(rule) => rule.category,
            None => {
                debug!(%title, default = %self.default, "No keyword matched; using default");
                self.default
            }
        }
    }
}
