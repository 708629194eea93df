//! Small helpers for URL normalization, log formatting, and output paths.

use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Drop everything from the first `?` onward.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_query("https://x/y?ref=abc"), "https://x/y");
/// assert_eq!(strip_query("https://x/y"), "https://x/y");
/// ```
pub fn strip_query(url: &str) -> String {
    url.split_once('?')
        .map_or(url, |(location, _)| location)
        .to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` characters with `"…(+N chars)"` appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    let total = s.chars().count();
    if total <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max).collect();
        format!("{}…(+{} chars)", head, total - max)
    }
}

/// Ensure an output file can be written before any scraping starts.
///
/// Creates missing parent directories, then creates (or truncates) the file
/// itself so a bad path fails fast instead of after a long scroll session.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_file(path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, "").await?;
    info!("Output file is writable");
    Ok(())
}
