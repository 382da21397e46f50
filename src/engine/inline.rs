use crate::engine::{BlockingBrowser, BlockingElement, BlockingPage, Browser, Element, Page};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Presents a blocking engine through the async traits, running each call on the current task.
///
/// The futures it produces complete on first poll, so they can be driven by
/// `futures::executor::block_on` from plain synchronous code.
#[derive(Clone)]
pub struct InlineBrowser {
    inner: Arc<dyn BlockingBrowser>,
}

impl InlineBrowser {
    pub fn new(inner: Arc<dyn BlockingBrowser>) -> Self {
        Self { inner }
    }
}

struct InlinePage(Arc<dyn BlockingPage>);

struct InlineElement(Arc<dyn BlockingElement>);

fn wrap_page(page: Arc<dyn BlockingPage>) -> Arc<dyn Page> {
    Arc::new(InlinePage(page))
}

#[async_trait]
impl Browser for InlineBrowser {
    async fn pages(&self) -> Result<Vec<Arc<dyn Page>>> {
        Ok(self.inner.pages()?.into_iter().map(wrap_page).collect())
    }

    async fn new_page(&self) -> Result<Arc<dyn Page>> {
        self.inner.new_page().map(wrap_page)
    }
}

#[async_trait]
impl Page for InlinePage {
    fn id(&self) -> String {
        self.0.id()
    }

    fn url(&self) -> String {
        self.0.url()
    }

    async fn goto(&self, url: &str) -> Result<Option<u16>> {
        self.0.goto(url)
    }

    async fn go_back(&self) -> Result<()> {
        self.0.go_back()
    }

    async fn inner_text(&self, selector: &str) -> Result<String> {
        self.0.inner_text(selector)
    }

    async fn content(&self) -> Result<String> {
        self.0.content()
    }

    async fn query_selector_all(&self, selector: &str) -> Result<Vec<Arc<dyn Element>>> {
        let elements = self.0.query_selector_all(selector)?;
        Ok(elements
            .into_iter()
            .map(|element| Arc::new(InlineElement(element)) as Arc<dyn Element>)
            .collect())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.0.click(selector)
    }
}

#[async_trait]
impl Element for InlineElement {
    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.0.attribute(name)
    }

    async fn inner_text(&self) -> Result<String> {
        self.0.inner_text()
    }
}
