use crate::engine::Page;
use crate::error::{BrowserError, Result};
use crate::tools::{Tool, ToolContext, Validate};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Elements whose rendered text is tried, in order, before falling back to raw markup
const TEXT_TARGETS: [&str; 2] = ["body", "html"];

/// Parameters for extracting text (no parameters needed)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExtractTextParams {}

impl Validate for ExtractTextParams {}

/// Tool for extracting all the text on the current page
#[derive(Default)]
pub struct ExtractTextTool;

/// Rendered text of `selector`, or an empty string when the engine cannot read it
async fn element_text(page: &dyn Page, selector: &str) -> String {
    match page.inner_text(selector).await {
        Ok(text) => text,
        Err(e) => {
            log::debug!("No text from '{}': {}", selector, e);
            String::new()
        }
    }
}

/// Best available plain-text rendering of `page`: `body` text, then `html` text, then the markup itself
pub async fn collect_text(page: &dyn Page) -> Result<String> {
    for selector in TEXT_TARGETS {
        let text = element_text(page, selector).await;
        if !text.is_empty() {
            return Ok(text);
        }
    }

    page.content().await.map_err(|e| match e {
        BrowserError::PageUnavailable(_) => e,
        other => BrowserError::PageUnavailable(other.to_string()),
    })
}

#[async_trait]
impl Tool for ExtractTextTool {
    type Params = ExtractTextParams;

    fn name(&self) -> &str {
        "extract_text"
    }

    fn description(&self) -> &str {
        "Extract all the text on the current webpage"
    }

    async fn execute_typed(&self, _params: ExtractTextParams, context: &ToolContext<'_>) -> Result<String> {
        let page = context.page().await?;
        collect_text(page.as_ref()).await
    }
}
