//! # Scroll Harvest
//!
//! Collects article records from an infinite-scroll listing page for one
//! calendar year, then writes them sorted by popularity to JSON and HTML.
//!
//! ## Usage
//!
//! ```sh
//! scroll_harvest --floor-year 2018 -j articles.json --html-output articles.html
//! ```
//!
//! ## Architecture
//!
//! 1. **Acquire**: open the listing in a page driver (live browser or replay)
//! 2. **Paginate**: extract new posts, scroll, settle, repeat until the listing
//!    falls below the floor year
//! 3. **Release**: dispose the driver, on success and on failure alike
//! 4. **Output**: sort by popularity and write JSON and HTML files

use clap::Parser;
use std::error::Error;
use std::time::Instant;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};
use url::Url;

mod cli;
mod driver;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use driver::replay::ReplayDriver;
use models::{Record, sort_by_popularity};
use outputs::{html, json};
use scrapers::controller::{PaginationController, run_scrape};
use utils::ensure_writable_file;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    info!("scroll_harvest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Fail on bad output paths before spending minutes scrolling.
    for path in [&args.json_output, &args.html_output] {
        if let Err(e) = ensure_writable_file(path).await {
            error!(path = %path.display(), error = %e, "Output file is not writable");
            return Err(e);
        }
    }

    let controller = PaginationController::new(args.controller_config());
    info!(
        url = %args.url,
        floor_year = controller.config().floor_year,
        settle_ms = controller.config().settle_interval.as_millis() as u64,
        "Starting scrape"
    );

    let mut records = harvest(&args, &controller).await.inspect_err(|e| {
        error!(error = %e, "Scrape aborted");
    })?;
    sort_by_popularity(&mut records);
    info!(count = records.len(), "Scraped {} articles.", records.len());

    json::write_records(&records, &args.json_output).await?;
    html::write_records(&records, &args.html_output).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

/// Pick a driver from the CLI and run one scraping session with it.
async fn harvest(
    args: &Cli,
    controller: &PaginationController,
) -> Result<Vec<Record>, Box<dyn Error>> {
    let listing_url = Url::parse(&args.url)?;

    if !args.replay.is_empty() {
        info!(frames = args.replay.len(), "Replaying saved snapshots");
        let driver = ReplayDriver::from_files(&args.replay, Some(listing_url)).await?;
        return Ok(run_scrape(controller, driver).await?);
    }

    live(args, &listing_url, controller).await
}

#[cfg(feature = "chrome")]
async fn live(
    args: &Cli,
    listing_url: &Url,
    controller: &PaginationController,
) -> Result<Vec<Record>, Box<dyn Error>> {
    use driver::chrome::ChromeDriver;

    let driver = ChromeDriver::launch(listing_url, !args.headful).await?;
    Ok(run_scrape(controller, driver).await?)
}

#[cfg(not(feature = "chrome"))]
async fn live(
    _args: &Cli,
    _listing_url: &Url,
    _controller: &PaginationController,
) -> Result<Vec<Record>, Box<dyn Error>> {
    Err("live scraping needs the `chrome` feature; pass --replay to use saved snapshots".into())
}
