use crate::engine::Page;
use crate::error::{BrowserError, Result};
use crate::tools::utils::resolve_href;
use crate::tools::{Tool, ToolContext, Validate};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Parameters for the extract_hyperlinks tool
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractHyperlinksParams {
    /// Return absolute URLs instead of the hrefs as authored (default: false)
    #[serde(default)]
    pub absolute_urls: bool,
}

impl Validate for ExtractHyperlinksParams {}

/// Tool for listing every hyperlink on the current page
#[derive(Default)]
pub struct ExtractHyperlinksTool;

/// Distinct link targets of `page`, sorted.
///
/// Anchors without an `href`, or with an empty one, contribute nothing.
pub async fn collect_links(page: &dyn Page, absolute_urls: bool) -> Result<BTreeSet<String>> {
    let base_url = page.url();
    let mut links = BTreeSet::new();

    for anchor in page.query_selector_all("a").await? {
        let href = match anchor.attribute("href").await? {
            Some(href) if !href.is_empty() => href,
            _ => continue,
        };

        let link = if absolute_urls { resolve_href(&base_url, &href) } else { href };
        links.insert(link);
    }

    Ok(links)
}

/// JSON array of the links in ascending order
fn format_links(links: &BTreeSet<String>) -> Result<String> {
    serde_json::to_string(links).map_err(|e| BrowserError::ToolExecutionFailed {
        tool: "extract_hyperlinks".to_string(),
        reason: e.to_string(),
    })
}

#[async_trait]
impl Tool for ExtractHyperlinksTool {
    type Params = ExtractHyperlinksParams;

    fn name(&self) -> &str {
        "extract_hyperlinks"
    }

    fn description(&self) -> &str {
        "Extract all hyperlinks on the current webpage"
    }

    async fn execute_typed(&self, params: ExtractHyperlinksParams, context: &ToolContext<'_>) -> Result<String> {
        let page = context.page().await?;
        let links = collect_links(page.as_ref(), params.absolute_urls).await?;
        log::debug!("Found {} distinct links on {}", links.len(), page.url());
        format_links(&links)
    }
}
