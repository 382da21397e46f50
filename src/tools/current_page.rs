use crate::error::Result;
use crate::tools::{Tool, ToolContext, Validate};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct CurrentPageParams {}

impl Validate for CurrentPageParams {}

/// Tool reporting the URL of the current page
#[derive(Default)]
pub struct CurrentPageTool;

#[async_trait]
impl Tool for CurrentPageTool {
    type Params = CurrentPageParams;

    fn name(&self) -> &str {
        "current_webpage"
    }

    fn description(&self) -> &str {
        "Returns the URL of the current page"
    }

    async fn execute_typed(&self, _params: CurrentPageParams, context: &ToolContext<'_>) -> Result<String> {
        Ok(context.page().await?.url())
    }
}
