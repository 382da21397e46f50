//! In-memory browser engine
//!
//! A scripted, deterministic engine for tests and offline drivers. Pages hold a [`MemoryDocument`]
//! (markup, per-selector inner text, a flat list of elements); navigation looks documents up in
//! routes registered on the [`MemoryBrowser`].
//!
//! Selector support is deliberately small: `*`, `tag`, `#id`, `.class` and `tag.class`.

use crate::engine::{BlockingBrowser, BlockingElement, BlockingPage};
use crate::error::{BrowserError, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// URL of pages created by [`BlockingBrowser::new_page`]
pub const BLANK_URL: &str = "about:blank";

const BLANK_MARKUP: &str = "<html><head></head><body></body></html>";

type Routes = Arc<Mutex<HashMap<String, MemoryDocument>>>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// An element of a [`MemoryDocument`]
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryElement {
    pub tag_name: String,
    pub attributes: IndexMap<String, String>,
    pub inner_text: Option<String>,
}

impl MemoryElement {
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self { tag_name: tag_name.into(), attributes: IndexMap::new(), inner_text: None }
    }

    /// Builder method: add an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Builder method: set rendered text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.inner_text = Some(text.into());
        self
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.attributes
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class_name))
    }

    /// Check the element against the small selector subset described in the module docs
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        if selector == "*" {
            return true;
        }
        if let Some(id) = selector.strip_prefix('#') {
            return self.attributes.get("id").is_some_and(|v| v == id);
        }
        match selector.split_once('.') {
            Some(("", class_name)) => self.has_class(class_name),
            Some((tag, class_name)) => self.tag_name.eq_ignore_ascii_case(tag) && self.has_class(class_name),
            None => self.tag_name.eq_ignore_ascii_case(selector),
        }
    }
}

impl BlockingElement for MemoryElement {
    fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attributes.get(name).cloned())
    }

    fn inner_text(&self) -> Result<String> {
        Ok(self.inner_text.clone().unwrap_or_default())
    }
}

/// A scripted document
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryDocument {
    markup: Option<String>,
    texts: HashMap<String, String>,
    elements: Vec<MemoryElement>,
    status: Option<u16>,
}

impl MemoryDocument {
    pub fn new(markup: impl Into<String>) -> Self {
        Self { markup: Some(markup.into()), texts: HashMap::new(), elements: Vec::new(), status: Some(200) }
    }

    /// A document whose markup cannot be read
    pub fn unreadable() -> Self {
        Self { markup: None, ..Self::new("") }
    }

    /// Builder method: rendered text returned for `selector`. Selectors without text fail to read.
    pub fn with_text(mut self, selector: impl Into<String>, text: impl Into<String>) -> Self {
        self.texts.insert(selector.into(), text.into());
        self
    }

    /// Builder method: append an element
    pub fn with_element(mut self, element: MemoryElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Builder method: HTTP status reported on navigation (`None` when unknown)
    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }

    fn blank() -> Self {
        Self::new(BLANK_MARKUP)
    }
}

struct PageState {
    url: String,
    document: MemoryDocument,
    history: Vec<(String, MemoryDocument)>,
    clicks: Vec<String>,
}

/// A page of a [`MemoryBrowser`]
pub struct MemoryPage {
    id: String,
    routes: Routes,
    state: Mutex<PageState>,
}

impl MemoryPage {
    fn new(id: String, routes: Routes, url: impl Into<String>, document: MemoryDocument) -> Self {
        let state = PageState { url: url.into(), document, history: Vec::new(), clicks: Vec::new() };
        Self { id, routes, state: Mutex::new(state) }
    }

    /// Selectors clicked on this page, in order
    pub fn clicks(&self) -> Vec<String> {
        lock(&self.state).clicks.clone()
    }

    /// Number of entries behind the current one
    pub fn history_len(&self) -> usize {
        lock(&self.state).history.len()
    }
}

impl BlockingPage for MemoryPage {
    fn id(&self) -> String {
        self.id.clone()
    }

    fn url(&self) -> String {
        lock(&self.state).url.clone()
    }

    fn goto(&self, url: &str) -> Result<Option<u16>> {
        let document = lock(&self.routes)
            .get(url)
            .cloned()
            .ok_or_else(|| BrowserError::NavigationFailed(format!("net::ERR_NAME_NOT_RESOLVED at {}", url)))?;

        let mut state = lock(&self.state);
        let previous_url = std::mem::replace(&mut state.url, url.to_string());
        let previous_document = std::mem::replace(&mut state.document, document);
        state.history.push((previous_url, previous_document));
        Ok(state.document.status)
    }

    fn go_back(&self) -> Result<()> {
        let mut state = lock(&self.state);
        let (url, document) = state.history.pop().ok_or_else(|| BrowserError::NoHistory(state.url.clone()))?;
        state.url = url;
        state.document = document;
        Ok(())
    }

    fn inner_text(&self, selector: &str) -> Result<String> {
        lock(&self.state)
            .document
            .texts
            .get(selector)
            .cloned()
            .ok_or_else(|| BrowserError::ElementNotFound(selector.to_string()))
    }

    fn content(&self) -> Result<String> {
        let state = lock(&self.state);
        state.document.markup.clone().ok_or_else(|| BrowserError::PageUnavailable(state.url.clone()))
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<Arc<dyn BlockingElement>>> {
        Ok(lock(&self.state)
            .document
            .elements
            .iter()
            .filter(|element| element.matches(selector))
            .map(|element| Arc::new(element.clone()) as Arc<dyn BlockingElement>)
            .collect())
    }

    fn click(&self, selector: &str) -> Result<()> {
        let mut state = lock(&self.state);
        if !state.document.elements.iter().any(|element| element.matches(selector)) {
            return Err(BrowserError::ElementNotFound(selector.to_string()));
        }
        state.clicks.push(selector.to_string());
        Ok(())
    }
}

/// Scripted browser holding [`MemoryPage`]s
pub struct MemoryBrowser {
    pages: Mutex<Vec<Arc<MemoryPage>>>,
    routes: Routes,
    next_id: AtomicUsize,
    created: AtomicUsize,
    connected: AtomicBool,
}

impl MemoryBrowser {
    pub fn new() -> Self {
        Self {
            pages: Mutex::new(Vec::new()),
            routes: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicUsize::new(1),
            created: AtomicUsize::new(0),
            connected: AtomicBool::new(true),
        }
    }

    /// Register the document served for `url`
    pub fn route(&self, url: impl Into<String>, document: MemoryDocument) {
        lock(&self.routes).insert(url.into(), document);
    }

    /// Open a page as if the user had opened it; it becomes the current page
    pub fn open_page(&self, url: impl Into<String>, document: MemoryDocument) -> Arc<MemoryPage> {
        let id = format!("page-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let page = Arc::new(MemoryPage::new(id, self.routes.clone(), url, document));
        lock(&self.pages).push(page.clone());
        page
    }

    /// Pages created through [`BlockingBrowser::new_page`]
    pub fn created_pages(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Page count, whatever their origin
    pub fn page_count(&self) -> usize {
        lock(&self.pages).len()
    }

    /// Make every later engine call report the browser as unreachable
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(BrowserError::EngineUnavailable("memory browser disconnected".to_string()))
        }
    }
}

impl Default for MemoryBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockingBrowser for MemoryBrowser {
    fn pages(&self) -> Result<Vec<Arc<dyn BlockingPage>>> {
        self.ensure_connected()?;
        Ok(lock(&self.pages).iter().map(|page| page.clone() as Arc<dyn BlockingPage>).collect())
    }

    fn new_page(&self) -> Result<Arc<dyn BlockingPage>> {
        self.ensure_connected()?;
        self.created.fetch_add(1, Ordering::SeqCst);
        let page: Arc<dyn BlockingPage> = self.open_page(BLANK_URL, MemoryDocument::blank());
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_subset() {
        let link = MemoryElement::new("a")
            .with_attribute("id", "home")
            .with_attribute("class", "nav primary");

        assert!(link.matches("a"));
        assert!(link.matches("A"));
        assert!(link.matches("*"));
        assert!(link.matches("#home"));
        assert!(link.matches(".primary"));
        assert!(link.matches("a.nav"));
        assert!(!link.matches("button"));
        assert!(!link.matches("#other"));
        assert!(!link.matches("div.nav"));
    }

    #[test]
    fn test_navigation_history() {
        let browser = MemoryBrowser::new();
        browser.route("https://example.com/next", MemoryDocument::new("<p>next</p>").with_status(Some(201)));
        let page = browser.open_page("https://example.com/", MemoryDocument::new("<p>start</p>"));

        assert_eq!(page.goto("https://example.com/next").unwrap(), Some(201));
        assert_eq!(page.url(), "https://example.com/next");
        assert_eq!(page.history_len(), 1);

        page.go_back().unwrap();
        assert_eq!(page.url(), "https://example.com/");
        assert_eq!(page.content().unwrap(), "<p>start</p>");
        assert!(matches!(page.go_back(), Err(BrowserError::NoHistory(_))));
    }

    #[test]
    fn test_unknown_route_fails_navigation() {
        let browser = MemoryBrowser::new();
        let page = browser.open_page(BLANK_URL, MemoryDocument::blank());

        assert!(matches!(page.goto("https://nowhere.invalid/"), Err(BrowserError::NavigationFailed(_))));
        assert_eq!(page.url(), BLANK_URL);
    }

    #[test]
    fn test_reads_and_clicks() {
        let browser = MemoryBrowser::new();
        let page = browser.open_page(
            "https://example.com/",
            MemoryDocument::new("<html></html>")
                .with_text("body", "Body text")
                .with_element(MemoryElement::new("button").with_attribute("id", "go")),
        );

        assert_eq!(page.inner_text("body").unwrap(), "Body text");
        assert!(page.inner_text("html").is_err());
        assert!(page.click("#go").is_ok());
        assert!(matches!(page.click("#missing"), Err(BrowserError::ElementNotFound(_))));
        assert_eq!(page.clicks(), vec!["#go".to_string()]);
    }

    #[test]
    fn test_new_page_is_blank_and_counted() {
        let browser = MemoryBrowser::new();
        let page = browser.new_page().unwrap();

        assert_eq!(page.url(), BLANK_URL);
        assert_eq!(browser.created_pages(), 1);
        assert_eq!(browser.page_count(), 1);
    }

    #[test]
    fn test_unreadable_document() {
        let browser = MemoryBrowser::new();
        let page = browser.open_page("https://example.com/", MemoryDocument::unreadable());
        assert!(matches!(page.content(), Err(BrowserError::PageUnavailable(_))));
    }
}
