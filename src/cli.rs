//! Command-line interface definitions for Scroll Harvest.
//!
//! Every option can also be supplied through an environment variable.

use crate::scrapers::controller::{ControllerConfig, DEFAULT_FLOOR_YEAR};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Command-line arguments for the Scroll Harvest application.
///
/// # Examples
///
/// ```sh
/// # Live run against the default listing (requires the `chrome` feature)
/// scroll_harvest
///
/// # Collect 2019 instead, writing next to a report directory
/// scroll_harvest --floor-year 2019 -j out/articles.json --html-output out/articles.html
///
/// # Replay saved snapshots, no browser needed
/// scroll_harvest --settle-ms 0 --replay page-0.html page-1.html page-2.html
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Infinite-scroll listing to harvest
    #[arg(
        short,
        long,
        env = "LISTING_URL",
        default_value = "https://hackernoon.com/tagged/javascript"
    )]
    pub url: String,

    /// Calendar year to collect; the first batch with nothing from this year or later ends the run
    #[arg(long, env = "FLOOR_YEAR", default_value_t = DEFAULT_FLOOR_YEAR)]
    pub floor_year: i32,

    /// Pause after each scroll, in milliseconds, before taking the next snapshot
    #[arg(long, env = "SETTLE_MS", default_value_t = 7500)]
    pub settle_ms: u64,

    /// Output path for the JSON file
    #[arg(short, long, env = "JSON_OUTPUT", default_value = "articles.json")]
    pub json_output: PathBuf,

    /// Output path for the HTML file
    #[arg(long, env = "HTML_OUTPUT", default_value = "articles.html")]
    pub html_output: PathBuf,

    /// Replay saved HTML snapshots (one per scroll step) instead of driving a browser
    #[arg(long, num_args = 1..)]
    pub replay: Vec<PathBuf>,

    /// Show the browser window (chrome driver only)
    #[arg(long, default_value_t = false)]
    pub headful: bool,
}

impl Cli {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            floor_year: self.floor_year,
            settle_interval: Duration::from_millis(self.settle_ms),
        }
    }
}
