//! JSON output: the sorted records as one compact array.

use crate::models::Record;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `records` to `path` as a JSON array.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_records(records: &[Record], path: &Path) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(records)?;
    fs::write(path, json).await?;
    info!(count = records.len(), "Wrote JSON output");
    Ok(())
}
