//! Error types for the weekly news pipeline.
//!
//! [`Error`] covers every failure a single operation can hit. The runner wraps
//! it in a [`StageError`] so the operator sees which stage of the pipeline
//! aborted the run.

use chrono::NaiveDate;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the pipeline's building blocks.
#[derive(Debug, Error)]
pub enum Error {
    /// An optional external source failed or produced nothing. Never fatal.
    #[error("data source '{source_name}' is unavailable: {reason}")]
    DataSourceUnavailable { source_name: String, reason: String },

    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid yaml in {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("no `const {identifier} = [...]` assignment found in document")]
    PatchTargetNotFound { identifier: String },

    #[error("`const {identifier} = [...]` appears {count} times; refusing to pick one")]
    PatchTargetAmbiguous { identifier: String, count: usize },

    #[error("array literal assigned to `{identifier}` is never closed")]
    PatchTargetUnterminated { identifier: String },

    #[error("no monday on or before {0} is representable")]
    DateOutOfRange(NaiveDate),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// Attach a path to an [`io::Error`].
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// The pipeline stage an error escaped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CatalogLoad,
    Fetch,
    Stamp,
    JsonWrite,
    HtmlPatch,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::CatalogLoad => "catalog load",
            Stage::Fetch => "fetch",
            Stage::Stamp => "stamp",
            Stage::JsonWrite => "JSON write",
            Stage::HtmlPatch => "HTML patch",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An [`Error`] tagged with the stage that produced it.
#[derive(Debug, Error)]
#[error("{stage} failed: {source}")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: Error,
}

/// Tag a `Result` with the stage it belongs to.
pub trait StageContext<T> {
    fn stage(self, stage: Stage) -> std::result::Result<T, StageError>;
}

impl<T> StageContext<T> for Result<T> {
    fn stage(self, stage: Stage) -> std::result::Result<T, StageError> {
        self.map_err(|source| StageError { stage, source })
    }
}
