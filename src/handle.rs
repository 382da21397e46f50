use crate::engine::{BlockingBrowser, Browser, ExecutionMode, InlineBrowser, Page};
use crate::error::{BrowserError, Result};
use crate::resolver;
use std::sync::Arc;

/// The browser a tool is bound to, tagged with how it is driven
#[derive(Clone)]
pub enum BrowserHandle {
    /// Driven from synchronous code; engine calls block the calling thread
    Blocking(Arc<dyn BlockingBrowser>),
    /// Driven from async code; engine calls suspend the calling task
    Async(Arc<dyn Browser>),
}

impl BrowserHandle {
    pub fn blocking(browser: Arc<dyn BlockingBrowser>) -> Self {
        BrowserHandle::Blocking(browser)
    }

    pub fn asynchronous(browser: Arc<dyn Browser>) -> Self {
        BrowserHandle::Async(browser)
    }

    /// Build a handle from an optional pair, as drivers that carry both slots do.
    ///
    /// `tool` names the caller in the error raised when neither or both are given.
    pub fn from_browsers(
        tool: &str,
        blocking: Option<Arc<dyn BlockingBrowser>>,
        asynchronous: Option<Arc<dyn Browser>>,
    ) -> Result<Self> {
        match (blocking, asynchronous) {
            (Some(browser), None) => Ok(BrowserHandle::Blocking(browser)),
            (None, Some(browser)) => Ok(BrowserHandle::Async(browser)),
            (None, None) => Err(BrowserError::NoHandleProvided { tool: tool.to_string() }),
            (Some(_), Some(_)) => Err(BrowserError::AmbiguousHandle { tool: tool.to_string() }),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        match self {
            BrowserHandle::Blocking(_) => ExecutionMode::Blocking,
            BrowserHandle::Async(_) => ExecutionMode::Async,
        }
    }

    /// The blocking browser lifted into the async traits, or `MissingHandle` for an async handle
    pub(crate) fn inline(&self, tool: &str) -> Result<InlineBrowser> {
        match self {
            BrowserHandle::Blocking(browser) => Ok(InlineBrowser::new(browser.clone())),
            BrowserHandle::Async(_) => {
                Err(BrowserError::MissingHandle { tool: tool.to_string(), mode: ExecutionMode::Blocking })
            }
        }
    }

    /// The async browser, or `MissingHandle` for a blocking handle
    pub(crate) fn async_browser(&self, tool: &str) -> Result<&Arc<dyn Browser>> {
        match self {
            BrowserHandle::Async(browser) => Ok(browser),
            BrowserHandle::Blocking(_) => {
                Err(BrowserError::MissingHandle { tool: tool.to_string(), mode: ExecutionMode::Async })
            }
        }
    }

    /// Resolve the current page from synchronous code
    pub fn resolve_page(&self) -> Result<Arc<dyn Page>> {
        let browser = self.inline("resolve_page")?;
        futures::executor::block_on(resolver::current_page(&browser))
    }

    /// Resolve the current page from async code
    pub async fn resolve_page_async(&self) -> Result<Arc<dyn Page>> {
        let browser = self.async_browser("resolve_page")?;
        resolver::current_page(browser.as_ref()).await
    }
}

impl From<Arc<dyn BlockingBrowser>> for BrowserHandle {
    fn from(browser: Arc<dyn BlockingBrowser>) -> Self {
        BrowserHandle::Blocking(browser)
    }
}

impl From<Arc<dyn Browser>> for BrowserHandle {
    fn from(browser: Arc<dyn Browser>) -> Self {
        BrowserHandle::Async(browser)
    }
}
