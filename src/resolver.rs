//! Current page resolution
//!
//! The current page is the engine's most recently opened/active page, i.e. the last one it
//! enumerates. A browser with no pages gets a fresh blank one, so tools always have a page to
//! work on right after launch. Engine failures surface as `EngineUnavailable` and are not retried.

use crate::engine::{Browser, Page};
use crate::error::{BrowserError, Result};
use std::sync::Arc;

fn unavailable(e: BrowserError) -> BrowserError {
    match e {
        BrowserError::EngineUnavailable(_) => e,
        other => BrowserError::EngineUnavailable(other.to_string()),
    }
}

/// Pick the page tools should operate on
pub async fn current_page(browser: &dyn Browser) -> Result<Arc<dyn Page>> {
    let mut pages = browser.pages().await.map_err(|e| {
        log::warn!("Failed to enumerate pages: {}", e);
        unavailable(e)
    })?;

    if let Some(page) = pages.pop() {
        return Ok(page);
    }

    log::debug!("No open page, creating a blank one");
    browser.new_page().await.map_err(|e| {
        log::warn!("Failed to create page: {}", e);
        unavailable(e)
    })
}
