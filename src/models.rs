//! Data models for harvested listing entries.
//!
//! - [`Record`]: one article entry discovered on the listing page
//! - [`ScrollState`]: per-session bookkeeping owned by the pagination loop
//!
//! Records serialize with camelCase keys so the JSON output reads the same
//! as the listing's own vocabulary (`publishedAt`, `popularityScore`, ...).

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// One listing entry as extracted from a post element.
///
/// Every field is best-effort. Absence is always `None`, except for
/// `popularity_score` whose natural absence value is `0`.
///
/// Records are never mutated after extraction; the controller only appends
/// and filters collections of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Article location with the query string removed.
    pub url: Option<String>,
    /// Publication timestamp, `None` when missing or unparseable.
    pub published_at: Option<DateTime<Utc>>,
    /// Clap/like counter decoded from compact notation (`1.2K` -> 1200).
    pub popularity_score: u64,
    /// Headline text.
    pub title: Option<String>,
    /// Author display name. Present if and only if `author_url` is.
    pub author_name: Option<String>,
    /// Author profile location with the query string removed.
    pub author_url: Option<String>,
    /// Human-readable read time, e.g. `"5 min read"`.
    pub read_time_label: Option<String>,
}

impl Record {
    /// Calendar year (UTC) of publication, if the timestamp is known.
    ///
    /// The year does not depend on the host time zone, so every machine
    /// files a post under the same year. Posts published within a few hours
    /// of New Year can land in a different year than the local calendar shows.
    pub fn published_year(&self) -> Option<i32> {
        self.published_at.map(|at| at.year())
    }
}

/// Mutable state of one scraping session.
///
/// `consumed` counts raw post elements already turned into candidates,
/// including failed ones. `accumulated` holds the matching records in
/// discovery order.
#[derive(Debug, Default)]
pub struct ScrollState {
    pub consumed: usize,
    pub accumulated: Vec<Record>,
}

impl ScrollState {
    /// Mark `batch_len` more post elements as consumed.
    pub fn advance(&mut self, batch_len: usize) {
        self.consumed = self.consumed.saturating_add(batch_len);
    }

    /// Append one iteration's matches, keeping their order.
    pub fn absorb(&mut self, matches: impl IntoIterator<Item = Record>) {
        self.accumulated.extend(matches);
    }

    /// Finish the session, yielding everything accumulated so far.
    pub fn into_records(self) -> Vec<Record> {
        self.accumulated
    }
}

/// Sort records by popularity, most popular first.
///
/// The sort is stable, so records with equal scores keep discovery order.
pub fn sort_by_popularity(records: &mut [Record]) {
    records.sort_by(|a, b| b.popularity_score.cmp(&a.popularity_score));
}
