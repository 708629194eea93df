//! Page drivers: the capability the pagination loop uses to see and grow
//! the listing.
//!
//! A driver owns exactly one page for one scraping session. It can hand out
//! snapshots of what is rendered, run extraction against a snapshot, trigger
//! the next lazy load by scrolling, pause, and finally release the page.
//!
//! # Drivers
//!
//! | Driver | Module | Source of snapshots |
//! |--------|--------|---------------------|
//! | Replay | [`replay`] | Saved HTML files, one per scroll step |
//! | Chrome | `chrome` (feature `chrome`) | Live headless Chromium via CDP |

#[cfg(feature = "chrome")]
pub mod chrome;
pub mod replay;

use crate::scrapers::document::DocumentView;
use std::time::Duration;
use thiserror::Error;

/// Failures acquiring or driving the page. Always fatal for the session.
#[derive(Debug, Error)]
pub enum DriverError {
    #[cfg_attr(not(feature = "chrome"), allow(dead_code))]
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[cfg_attr(not(feature = "chrome"), allow(dead_code))]
    #[error("failed to open {url}: {reason}")]
    Navigation { url: String, reason: String },

    #[cfg_attr(not(feature = "chrome"), allow(dead_code))]
    #[error("browser protocol error: {0}")]
    Protocol(String),

    #[error("no snapshots to replay")]
    EmptyReplay,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Capability to drive one lazily-loading listing page.
pub trait PageDriver {
    type Document: DocumentView;

    /// Current rendered state of the page.
    async fn snapshot(&mut self) -> Result<Self::Document, DriverError>;

    /// Run `f` against a fresh snapshot and return its result.
    async fn evaluate<T, F>(&mut self, f: F) -> Result<T, DriverError>
    where
        F: FnOnce(&Self::Document) -> T,
    {
        let document = self.snapshot().await?;
        Ok(f(&document))
    }

    /// Scroll to the bottom of the content, triggering the next lazy load.
    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError>;

    /// Pause so freshly triggered content can render.
    async fn wait(&mut self, duration: Duration) -> Result<(), DriverError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    /// Release the page and anything backing it.
    async fn dispose(self) -> Result<(), DriverError>;
}
