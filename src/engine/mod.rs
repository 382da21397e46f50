//! Browser engine seam
//!
//! The tool layer talks to a browser exclusively through these traits:
//! - [`Browser`], [`Page`], [`Element`]: the async (cooperatively scheduled) interface every tool is written against
//! - [`BlockingBrowser`], [`BlockingPage`], [`BlockingElement`]: the same capabilities for engines that block the
//!   calling thread, such as the Chrome DevTools backend
//!
//! Blocking engines are lifted into the async interface by an adapter, either [`inline::InlineBrowser`]
//! (runs each call on the current task) or `threaded::ThreadedBrowser` (runs each call on the tokio blocking pool).
//! Every engine call is a suspension point; tools never do CPU work across one.

pub mod inline;
pub mod memory;
#[cfg(feature = "tokio")]
pub mod threaded;

pub use inline::InlineBrowser;
pub use memory::{MemoryBrowser, MemoryDocument, MemoryElement};
#[cfg(feature = "tokio")]
pub use threaded::ThreadedBrowser;

use crate::error::Result;
use async_trait::async_trait;
use std::{fmt, sync::Arc};

/// How a browser handle is driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Engine calls block the calling thread
    Blocking,
    /// Engine calls suspend the calling task
    Async,
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionMode::Blocking => f.write_str("blocking"),
            ExecutionMode::Async => f.write_str("async"),
        }
    }
}

/// A running browser, seen from the tool layer
#[async_trait]
pub trait Browser: Send + Sync {
    /// Open pages, oldest first. The last entry is the engine's current page.
    async fn pages(&self) -> Result<Vec<Arc<dyn Page>>>;

    /// Open a blank page and make it current
    async fn new_page(&self) -> Result<Arc<dyn Page>>;
}

/// One tab/document of a [`Browser`]
#[async_trait]
pub trait Page: Send + Sync {
    /// Identifier that stays stable for the lifetime of the page
    fn id(&self) -> String;

    /// Current document URL
    fn url(&self) -> String;

    /// Load `url`; returns the HTTP status when the engine knows it
    async fn goto(&self, url: &str) -> Result<Option<u16>>;

    /// Move to the previous history entry, failing with `NoHistory` when there is none
    async fn go_back(&self) -> Result<()>;

    /// Rendered text of the first element matching `selector`
    async fn inner_text(&self, selector: &str) -> Result<String>;

    /// Serialized markup of the whole document
    async fn content(&self) -> Result<String>;

    /// Every element matching `selector`, in document order
    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Arc<dyn Element>>>;

    /// Click the first element matching `selector`, waiting as long as the engine's default policy allows
    async fn click(&self, selector: &str) -> Result<()>;
}

/// An element handle returned by [`Page::query_selector_all`]
#[async_trait]
pub trait Element: Send + Sync {
    /// Attribute value, `None` when the attribute is absent
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Rendered text of the element
    async fn inner_text(&self) -> Result<String>;
}

/// Blocking counterpart of [`Browser`]
pub trait BlockingBrowser: Send + Sync {
    fn pages(&self) -> Result<Vec<Arc<dyn BlockingPage>>>;
    fn new_page(&self) -> Result<Arc<dyn BlockingPage>>;
}

/// Blocking counterpart of [`Page`]
pub trait BlockingPage: Send + Sync {
    fn id(&self) -> String;
    fn url(&self) -> String;
    fn goto(&self, url: &str) -> Result<Option<u16>>;
    fn go_back(&self) -> Result<()>;
    fn inner_text(&self, selector: &str) -> Result<String>;
    fn content(&self) -> Result<String>;
    fn query_selector_all(&self, selector: &str) -> Result<Vec<Arc<dyn BlockingElement>>>;
    fn click(&self, selector: &str) -> Result<()>;
}

/// Blocking counterpart of [`Element`]
pub trait BlockingElement: Send + Sync {
    fn attribute(&self, name: &str) -> Result<Option<String>>;
    fn inner_text(&self) -> Result<String>;
}
