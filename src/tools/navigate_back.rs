use crate::error::Result;
use crate::tools::{Tool, ToolContext, Validate};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for going back (no parameters needed)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NavigateBackParams {}

impl Validate for NavigateBackParams {}

/// Tool for returning to the previous page in history.
///
/// With no previous entry the engine's `NoHistory` error is returned as-is.
#[derive(Default)]
pub struct NavigateBackTool;

#[async_trait]
impl Tool for NavigateBackTool {
    type Params = NavigateBackParams;

    fn name(&self) -> &str {
        "previous_webpage"
    }

    fn description(&self) -> &str {
        "Navigate back to the previous page in the browser history"
    }

    async fn execute_typed(&self, _params: NavigateBackParams, context: &ToolContext<'_>) -> Result<String> {
        let page = context.page().await?;
        page.go_back().await?;
        Ok(format!("Navigated back to the previous page with URL '{}'", page.url()))
    }
}
