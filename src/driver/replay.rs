//! Offline driver that replays saved listing snapshots.
//!
//! Frame `n` is what the page looked like after `n` scrolls. Scrolling past
//! the last frame keeps showing it, which is what a listing that stopped
//! loading looks like.

use super::{DriverError, PageDriver};
use crate::scrapers::document::HtmlDocument;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info, instrument};
use url::Url;

#[derive(Debug)]
pub struct ReplayDriver {
    frames: Vec<String>,
    cursor: usize,
    base: Option<Url>,
}

impl ReplayDriver {
    /// Replay in-memory HTML frames.
    pub fn new(frames: Vec<String>, base: Option<Url>) -> Result<Self, DriverError> {
        if frames.is_empty() {
            return Err(DriverError::EmptyReplay);
        }
        Ok(Self {
            frames,
            cursor: 0,
            base,
        })
    }

    /// Load frames from files, in the order given.
    #[instrument(level = "info", skip_all, fields(frames = paths.len()))]
    pub async fn from_files(paths: &[PathBuf], base: Option<Url>) -> Result<Self, DriverError> {
        let mut frames = Vec::with_capacity(paths.len());
        for path in paths {
            let html = fs::read_to_string(path).await?;
            debug!(path = %path.display(), bytes = html.len(), "Loaded replay frame");
            frames.push(html);
        }
        info!("Replay frames loaded");
        Self::new(frames, base)
    }

    /// Index of the frame currently shown.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl PageDriver for ReplayDriver {
    type Document = HtmlDocument;

    async fn snapshot(&mut self) -> Result<HtmlDocument, DriverError> {
        let frame = self.frames.get(self.cursor).ok_or(DriverError::EmptyReplay)?;
        Ok(HtmlDocument::parse(frame, self.base.clone()))
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        let last = self.frames.len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
        debug!(cursor = self.cursor, "Advanced replay frame");
        Ok(())
    }

    async fn dispose(self) -> Result<(), DriverError> {
        debug!(frames = self.frames.len(), last_frame = self.cursor(), "Replay driver released");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrapers::document::DocumentView;
    use crate::scrapers::fixtures::{PostHtml, listing};

    #[test]
    fn test_new_rejects_empty_replay() {
        assert!(matches!(
            ReplayDriver::new(vec![], None),
            Err(DriverError::EmptyReplay)
        ));
    }

    #[tokio::test]
    async fn test_scroll_advances_and_sticks_at_last_frame() {
        let mut driver = ReplayDriver::new(
            vec![
                listing(&[PostHtml::in_year(2019)]),
                listing(&[PostHtml::in_year(2019), PostHtml::in_year(2018)]),
            ],
            None,
        )
        .unwrap();

        assert_eq!(driver.snapshot().await.unwrap().posts().len(), 1);
        driver.scroll_to_bottom().await.unwrap();
        assert_eq!(driver.cursor(), 1);
        assert_eq!(driver.snapshot().await.unwrap().posts().len(), 2);
        driver.scroll_to_bottom().await.unwrap();
        assert_eq!(driver.cursor(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_runs_against_current_frame() {
        let mut driver =
            ReplayDriver::new(vec![listing(&vec![PostHtml::in_year(2018); 3])], None).unwrap();
        let count = driver.evaluate(|doc| doc.posts().len()).await.unwrap();
        assert_eq!(count, 3);
        driver.dispose().await.unwrap();
    }

    #[tokio::test]
    async fn test_from_files_reads_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("0.html");
        let second = dir.path().join("1.html");
        std::fs::write(&first, listing(&[PostHtml::in_year(2019)])).unwrap();
        std::fs::write(&second, listing(&[PostHtml::in_year(2019), PostHtml::in_year(2018)]))
            .unwrap();

        let mut driver = ReplayDriver::from_files(&[first, second], None).await.unwrap();
        assert_eq!(driver.snapshot().await.unwrap().posts().len(), 1);
        driver.scroll_to_bottom().await.unwrap();
        assert_eq!(driver.snapshot().await.unwrap().posts().len(), 2);
    }

    #[tokio::test]
    async fn test_from_files_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.html");
        assert!(matches!(
            ReplayDriver::from_files(&[missing], None).await,
            Err(DriverError::Io(_))
        ));
    }
}
