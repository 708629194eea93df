//! Turns post elements of a listing snapshot into [`Record`]s.
//!
//! Extraction is pure: it reads a [`DocumentView`] and returns one slot per
//! post element beyond the skip count. Each field is derived on its own and
//! falls back to a default when its sub-element is missing. A post whose
//! sub-elements are present but malformed yields `None` and is logged.

use crate::models::Record;
use crate::scrapers::document::{DocumentView, ElementError, Lookup, PostView};
use crate::utils::strip_query;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::{debug, warn};

/// Suffix the listing uses for thousands in compact counters (`1.2K`).
const THOUSANDS_SUFFIX: char = 'K';

/// Extract candidates from every post after the first `skip_count`.
///
/// # Arguments
///
/// * `document` - Snapshot of the listing to read
/// * `skip_count` - Number of leading posts already consumed by earlier batches
///
/// # Returns
///
/// One slot per remaining post, in document order. Failed posts occupy a
/// `None` slot so the caller can count them as consumed.
///
/// # Examples
///
/// ```ignore
/// let document = HtmlDocument::parse(&html, None);
/// let batch = extract(&document, 12);
/// assert_eq!(batch.len(), document.posts().len().saturating_sub(12));
/// ```
pub fn extract<D: DocumentView>(document: &D, skip_count: usize) -> Vec<Option<Record>> {
    let batch: Vec<Option<Record>> = document
        .posts()
        .iter()
        .enumerate()
        .skip(skip_count)
        .map(|(index, post)| match extract_record(post) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index, error = %e, "Skipping malformed post element");
                None
            }
        })
        .collect();

    debug!(skip_count, batch = batch.len(), "Extracted post batch");
    batch
}

/// Apply `mapper` to a found value, or fall back to `default` when the
/// sub-element is missing. Malformed sub-elements propagate as errors.
pub fn try_extract<T, U>(
    lookup: Lookup<T>,
    mapper: impl FnOnce(T) -> U,
    default: U,
) -> Result<U, ElementError> {
    Ok(lookup?.map_or(default, mapper))
}

fn extract_record<P: PostView>(post: &P) -> Result<Record, ElementError> {
    let published_at = try_extract(post.date(), |raw| parse_timestamp(&raw), None)?;
    let (author_name, author_url) = try_extract(
        post.author_link(),
        |author| (Some(author.name), Some(strip_query(&author.href))),
        (None, None),
    )?;
    let popularity_score = try_extract(post.counter(), |text| parse_popularity(&text), 0)?;
    let title = try_extract(post.title(), Some, None)?;
    let url = try_extract(post.link(), |href| Some(strip_query(&href)), None)?;
    let read_time_label = try_extract(post.label(), Some, None)?;

    Ok(Record {
        url,
        published_at,
        popularity_score,
        title,
        author_name,
        author_url,
        read_time_label,
    })
}

/// Decode a compact popularity counter.
///
/// # Arguments
///
/// * `text` - Visible counter text, optionally suffixed with `K` for thousands
///
/// # Returns
///
/// The rounded count. Anything unparseable (or negative) counts as 0.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(parse_popularity("1.2K"), 1200);
/// assert_eq!(parse_popularity("58"), 58);
/// assert_eq!(parse_popularity("claps"), 0);
/// ```
pub fn parse_popularity(text: &str) -> u64 {
    let text = text.trim();
    let (number, scale) = match text.strip_suffix(THOUSANDS_SUFFIX) {
        Some(number) => (number.trim(), 1000.0),
        None => (text, 1.0),
    };

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => (value * scale).round() as u64,
        _ => 0,
    }
}

/// Parse a `<time datetime>` value into UTC.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC), and
/// a bare `YYYY-MM-DD`.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
