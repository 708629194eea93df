//! Live driver backed by headless Chromium over CDP.
//!
//! One browser and one page are acquired in [`ChromeDriver::launch`] and
//! released in [`PageDriver::dispose`]. If navigation fails during launch the
//! browser is shut down before the error is returned, so a failed launch
//! never leaks a process.

use super::{DriverError, PageDriver};
use crate::scrapers::document::HtmlDocument;
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::error::CdpError;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight)";

fn protocol(e: CdpError) -> DriverError {
    DriverError::Protocol(e.to_string())
}

pub struct ChromeDriver {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
    base: Url,
}

impl ChromeDriver {
    /// Launch a browser and open `url` in a new page.
    #[instrument(level = "info", skip_all, fields(%url, headless = headless))]
    pub async fn launch(url: &Url, headless: bool) -> Result<Self, DriverError> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(DriverError::Launch)?;

        let (mut browser, mut events) = Browser::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler reported an error");
                }
            }
        });
        info!("Browser launched");

        let page = match browser.new_page(url.as_str()).await {
            Ok(page) => page,
            Err(e) => {
                error!(error = %e, "Navigation failed; shutting browser down");
                if let Err(close_err) = shutdown(&mut browser, handler).await {
                    warn!(error = %close_err, "Browser shutdown after failed navigation also failed");
                }
                return Err(DriverError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                });
            }
        };
        info!("Listing page opened");

        Ok(Self {
            browser,
            page,
            handler,
            base: url.clone(),
        })
    }

    /// Location links should resolve against: the page's current URL after
    /// any redirects, falling back to the launch URL.
    async fn current_base(&self) -> Url {
        self.page
            .url()
            .await
            .ok()
            .flatten()
            .and_then(|current| Url::parse(&current).ok())
            .unwrap_or_else(|| self.base.clone())
    }
}

async fn shutdown(browser: &mut Browser, handler: JoinHandle<()>) -> Result<(), DriverError> {
    browser.close().await.map_err(protocol)?;
    browser.wait().await?;
    handler
        .await
        .map_err(|e| DriverError::Protocol(e.to_string()))?;
    debug!("Browser shut down");
    Ok(())
}

impl PageDriver for ChromeDriver {
    type Document = HtmlDocument;

    async fn snapshot(&mut self) -> Result<HtmlDocument, DriverError> {
        let html = self.page.content().await.map_err(protocol)?;
        let base = self.current_base().await;
        debug!(bytes = html.len(), "Captured page snapshot");
        Ok(HtmlDocument::parse(&html, Some(base)))
    }

    async fn scroll_to_bottom(&mut self) -> Result<(), DriverError> {
        self.page
            .evaluate(SCROLL_TO_BOTTOM)
            .await
            .map_err(protocol)?;
        Ok(())
    }

    async fn dispose(self) -> Result<(), DriverError> {
        let Self {
            mut browser,
            page,
            handler,
            ..
        } = self;

        let page_closed = page.close().await.map_err(protocol);
        if let Err(ref e) = page_closed {
            warn!(error = %e, "Failed to close page");
        }
        let browser_closed = shutdown(&mut browser, handler).await;
        info!("Chrome driver released");
        page_closed.and(browser_closed)
    }
}
