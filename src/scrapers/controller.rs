//! The pagination loop over an infinite-scroll listing.
//!
//! Each iteration:
//!
//! 1. extracts every post beyond what was already consumed
//! 2. advances the consumed count by the batch length, failed slots included
//! 3. scrolls to the bottom and waits the settle interval for lazy content
//! 4. keeps records at or above the floor year; if none are left, stops
//! 5. otherwise appends the records from exactly the floor year and loops
//!
//! The listing is assumed to be newest-first: a batch with nothing at or
//! above the floor year means the relevant range is exhausted. Records newer
//! than the floor year only keep the loop going, they are never returned.

use crate::driver::{DriverError, PageDriver};
use crate::models::{Record, ScrollState};
use crate::scrapers::extractor::extract;
use crate::utils::truncate_for_log;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Year the reference deployment collects.
pub const DEFAULT_FLOOR_YEAR: i32 = 2018;
/// Pause after each scroll so the next batch can render.
pub const DEFAULT_SETTLE_INTERVAL: Duration = Duration::from_millis(7500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Only records published in this year are collected.
    pub floor_year: i32,
    pub settle_interval: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            floor_year: DEFAULT_FLOOR_YEAR,
            settle_interval: DEFAULT_SETTLE_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaginationController {
    config: ControllerConfig,
}

impl PaginationController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Drive `driver` until the listing leaves the floor year.
    ///
    /// Each iteration extracts the posts not yet consumed, scrolls, waits for
    /// the settle interval, and stops once a batch holds nothing published in
    /// or after the floor year.
    ///
    /// # Arguments
    ///
    /// * `driver` - Page session to read from; it stays open afterwards
    ///
    /// # Returns
    ///
    /// Floor-year records in discovery order. Any driver error aborts the run;
    /// releasing the driver is the caller's job (see [`run_scrape`]).
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let controller = PaginationController::new(ControllerConfig::default());
    /// let mut driver = ReplayDriver::from_files(&frames, None).await?;
    /// let records = controller.run(&mut driver).await?;
    /// driver.dispose().await?;
    /// ```
    #[instrument(level = "info", skip_all, fields(floor_year = self.config.floor_year))]
    pub async fn run<D: PageDriver>(&self, driver: &mut D) -> Result<Vec<Record>, DriverError> {
        let floor_year = self.config.floor_year;
        let mut state = ScrollState::default();
        let mut iteration = 0usize;

        loop {
            iteration += 1;
            let skip_count = state.consumed;
            info!(iteration, consumed = skip_count, "Loading next batch");

            let batch = driver
                .evaluate(move |document| extract(document, skip_count))
                .await?;
            state.advance(batch.len());

            driver.scroll_to_bottom().await?;
            driver.wait(self.config.settle_interval).await?;

            let in_window_or_newer: Vec<Record> = batch
                .into_iter()
                .flatten()
                .filter(|record| record.published_year().is_some_and(|year| year >= floor_year))
                .collect();

            if in_window_or_newer.is_empty() {
                info!(
                    iteration,
                    consumed = state.consumed,
                    collected = state.accumulated.len(),
                    "No records at or above floor year; listing exhausted"
                );
                return Ok(state.into_records());
            }

            let before = state.accumulated.len();
            state.absorb(
                in_window_or_newer
                    .into_iter()
                    .filter(|record| record.published_year() == Some(floor_year)),
            );
            let matched = state.accumulated.len() - before;

            info!(
                iteration,
                consumed = state.consumed,
                matched,
                collected = state.accumulated.len(),
                "Batch processed"
            );
            if let Some(last) = state.accumulated.last() {
                debug!(
                    title = %truncate_for_log(last.title.as_deref().unwrap_or_default(), 80),
                    url = ?last.url,
                    "Latest collected record"
                );
            }
        }
    }
}

/// Run one scraping session and release the driver, whatever the outcome.
///
/// The driver is disposed exactly once. A run error takes precedence over a
/// dispose error; a dispose error after a successful run is returned too,
/// since the page may still be held.
///
/// # Arguments
///
/// * `controller` - Pagination settings and loop
/// * `driver` - Page session, consumed and released here
///
/// # Returns
///
/// The records collected by [`PaginationController::run`].
///
/// # Examples
///
/// ```ignore
/// let driver = ReplayDriver::from_files(&frames, Some(listing_url)).await?;
/// let records = run_scrape(&PaginationController::new(config), driver).await?;
/// ```
#[instrument(level = "info", skip_all)]
pub async fn run_scrape<D: PageDriver>(
    controller: &PaginationController,
    mut driver: D,
) -> Result<Vec<Record>, DriverError> {
    let outcome = controller.run(&mut driver).await;
    let released = driver.dispose().await;

    match (outcome, released) {
        (Ok(records), Ok(())) => {
            info!(count = records.len(), "Scrape session finished");
            Ok(records)
        }
        (Ok(_), Err(e)) => Err(e),
        (Err(e), Ok(())) => Err(e),
        (Err(e), Err(dispose_err)) => {
            warn!(error = %dispose_err, "Driver release failed after aborted run");
            Err(e)
        }
    }
}
