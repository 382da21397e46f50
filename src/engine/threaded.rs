use crate::engine::{BlockingBrowser, BlockingElement, BlockingPage, Browser, Element, Page};
use crate::error::{BrowserError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Presents a blocking engine through the async traits by running every call on the tokio blocking pool.
///
/// This is how the Chrome backend serves async drivers: the runtime keeps making progress while
/// a CDP round-trip is in flight. Dropping the returned future abandons the result; the engine
/// call itself still runs to completion on its worker.
#[derive(Clone)]
pub struct ThreadedBrowser {
    inner: Arc<dyn BlockingBrowser>,
}

impl ThreadedBrowser {
    pub fn new(inner: Arc<dyn BlockingBrowser>) -> Self {
        Self { inner }
    }
}

struct ThreadedPage(Arc<dyn BlockingPage>);

struct ThreadedElement(Arc<dyn BlockingElement>);

async fn off_thread<T, F>(call: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(call)
        .await
        .map_err(|e| BrowserError::EngineUnavailable(format!("engine worker did not complete: {}", e)))?
}

fn wrap_page(page: Arc<dyn BlockingPage>) -> Arc<dyn Page> {
    Arc::new(ThreadedPage(page))
}

#[async_trait]
impl Browser for ThreadedBrowser {
    async fn pages(&self) -> Result<Vec<Arc<dyn Page>>> {
        let inner = self.inner.clone();
        let pages = off_thread(move || inner.pages()).await?;
        Ok(pages.into_iter().map(wrap_page).collect())
    }

    async fn new_page(&self) -> Result<Arc<dyn Page>> {
        let inner = self.inner.clone();
        off_thread(move || inner.new_page()).await.map(wrap_page)
    }
}

#[async_trait]
impl Page for ThreadedPage {
    fn id(&self) -> String {
        self.0.id()
    }

    fn url(&self) -> String {
        self.0.url()
    }

    async fn goto(&self, url: &str) -> Result<Option<u16>> {
        let (page, url) = (self.0.clone(), url.to_string());
        off_thread(move || page.goto(&url)).await
    }

    async fn go_back(&self) -> Result<()> {
        let page = self.0.clone();
        off_thread(move || page.go_back()).await
    }

    async fn inner_text(&self, selector: &str) -> Result<String> {
        let (page, selector) = (self.0.clone(), selector.to_string());
        off_thread(move || page.inner_text(&selector)).await
    }

    async fn content(&self) -> Result<String> {
        let page = self.0.clone();
        off_thread(move || page.content()).await
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Arc<dyn Element>>> {
        let (page, selector) = (self.0.clone(), selector.to_string());
        let elements = off_thread(move || page.query_selector_all(&selector)).await?;
        Ok(elements
            .into_iter()
            .map(|element| Arc::new(ThreadedElement(element)) as Arc<dyn Element>)
            .collect())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        let (page, selector) = (self.0.clone(), selector.to_string());
        off_thread(move || page.click(&selector)).await
    }
}

#[async_trait]
impl Element for ThreadedElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let (element, name) = (self.0.clone(), name.to_string());
        off_thread(move || element.attribute(&name)).await
    }

    async fn inner_text(&self) -> Result<String> {
        let element = self.0.clone();
        off_thread(move || element.inner_text()).await
    }
}
