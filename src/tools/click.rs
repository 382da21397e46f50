use crate::error::Result;
use crate::tools::{Tool, ToolContext, Validate};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the click tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ClickParams {
    /// CSS selector for the element to click
    pub selector: String,
}

impl Validate for ClickParams {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.selector.trim().is_empty() {
            return Err("selector must not be empty".to_string());
        }
        Ok(())
    }
}

/// Tool for clicking the first element matching a selector
#[derive(Default)]
pub struct ClickTool;

#[async_trait]
impl Tool for ClickTool {
    type Params = ClickParams;

    fn name(&self) -> &str {
        "click_element"
    }

    fn description(&self) -> &str {
        "Click on an element with the given CSS selector"
    }

    async fn execute_typed(&self, params: ClickParams, context: &ToolContext<'_>) -> Result<String> {
        let page = context.page().await?;
        page.click(&params.selector).await?;
        Ok(format!("Clicked element '{}'", params.selector))
    }
}
