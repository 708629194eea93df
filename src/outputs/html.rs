//! HTML output: a standalone page listing the records in order.
//!
//! Each list item reads
//! `<title link> by <author link> [read time] (popularity)`.

use crate::models::Record;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Write};
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <meta http-equiv="X-UA-Compatible" content="ie=edge" />
    <title>Articles</title>
  </head>
  <body>
    <ol>
"#;

const TAIL: &str = "    </ol>
  </body>
</html>
";

/// Element content, escaped. Missing values render empty.
fn text(value: &Option<String>) -> Cow<'_, str> {
    html_escape::encode_text(value.as_deref().unwrap_or_default())
}

/// Double-quoted `href` value, escaped. Missing values render empty.
fn attribute(value: &Option<String>) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(value.as_deref().unwrap_or_default())
}

/// Render `records` as an ordered list page.
pub fn render(records: &[Record]) -> Result<String, fmt::Error> {
    let mut page = String::from(HEAD);
    for record in records {
        writeln!(
            page,
            r#"      <li><a href="{}">{}</a> by <a href="{}">{}</a> [{}] ({})</li>"#,
            attribute(&record.url),
            text(&record.title),
            attribute(&record.author_url),
            text(&record.author_name),
            text(&record.read_time_label),
            record.popularity_score,
        )?;
    }
    page.push_str(TAIL);
    Ok(page)
}

/// Write the rendered page to `path`.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_records(records: &[Record], path: &Path) -> Result<(), Box<dyn Error>> {
    let page = render(records)?;
    fs::write(path, page).await?;
    info!(count = records.len(), "Wrote HTML output");
    Ok(())
}
