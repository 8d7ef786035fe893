//! Utility functions for file replacement and log formatting.
//!
//! - Atomic file replacement used by both output writers
//! - String truncation for logging long titles

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

/// Truncate a string for logging purposes.
///
/// Long strings are cut to `max` characters with an ellipsis and a byte count
/// indicator appended. Counts characters, not bytes, so CJK titles are never
/// split inside a code point.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("智能薪酬系统", 2), "智能…(+12 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Sibling temp path used while replacing `path`.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    path.with_file_name(format!(".{}.tmp.{}", name, std::process::id()))
}

/// Replace `path` with `bytes` without ever exposing a half-written file.
///
/// The data goes to a temp file in the same directory, is synced, and is then
/// renamed over the target. On any failure the temp file is removed and the
/// target keeps its previous contents. A missing parent directory is an error.
///
/// # Errors
///
/// Returns [`Error::Io`] naming the path that failed.
#[instrument(level = "debug", skip(bytes), fields(path = %path.display(), len = bytes.len()))]
pub async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp = temp_path_for(path);

    let written = async {
        let mut file = fs::File::create(&tmp)
            .await
            .map_err(|e| Error::io(&tmp, e))?;
        file.write_all(bytes).await.map_err(|e| Error::io(&tmp, e))?;
        file.sync_all().await.map_err(|e| Error::io(&tmp, e))?;
        fs::rename(&tmp, path).await.map_err(|e| Error::io(path, e))
    }
    .await;

    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&tmp).await {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                warn!(tmp = %tmp.display(), error = %cleanup, "Could not remove temp file");
            }
        }
        return Err(e);
    }

    debug!("Replaced file atomically");
    Ok(())
}
