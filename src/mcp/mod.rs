//! MCP (Model Context Protocol) server for the browser tools
//!
//! Each MCP tool forwards to the tool of the same purpose in [`crate::tools`] through the
//! [`crate::tools::ToolRegistry`], so validation and behavior match library callers exactly.

pub mod handler;
pub use handler::BrowserServer;

use crate::tools::{ClickParams, ExtractHyperlinksParams, GetElementsParams, NavigateParams};
use rmcp::{ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool, tool_router};
use serde::Serialize;
use serde_json::Value;

fn to_args<T: Serialize>(params: T) -> Result<Value, McpError> {
    serde_json::to_value(params).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

#[tool_router]
impl BrowserServer {
    /// Navigate to a URL
    #[tool(description = "Navigate the current tab to a URL (http or https; a missing scheme defaults to https)")]
    async fn browser_navigate(&self, params: Parameters<NavigateParams>) -> Result<CallToolResult, McpError> {
        self.call("navigate", to_args(params.0)?).await
    }

    /// Go back in history
    #[tool(description = "Navigate back to the previous page in the current tab's history")]
    async fn browser_navigate_back(&self) -> Result<CallToolResult, McpError> {
        self.call("previous_webpage", Value::Null).await
    }

    /// Click on an element
    #[tool(description = "Click the first element matching a CSS selector")]
    async fn browser_click(&self, params: Parameters<ClickParams>) -> Result<CallToolResult, McpError> {
        self.call("click_element", to_args(params.0)?).await
    }

    /// Read attributes of matching elements
    #[tool(description = "List elements matching a CSS selector as JSON objects of the requested attributes")]
    async fn browser_get_elements(&self, params: Parameters<GetElementsParams>) -> Result<CallToolResult, McpError> {
        self.call("get_elements", to_args(params.0)?).await
    }

    /// URL of the current tab
    #[tool(description = "Return the URL of the current tab")]
    async fn browser_current_page(&self) -> Result<CallToolResult, McpError> {
        self.call("current_webpage", Value::Null).await
    }

    /// Extract text content from the page
    #[tool(description = "Extract the visible text of the current page, falling back to its HTML")]
    async fn browser_extract_text(&self) -> Result<CallToolResult, McpError> {
        self.call("extract_text", Value::Null).await
    }

    /// Extract hyperlinks from the page
    #[tool(description = "List the distinct hyperlinks of the current page as a sorted JSON array")]
    async fn browser_extract_hyperlinks(
        &self,
        params: Parameters<ExtractHyperlinksParams>,
    ) -> Result<CallToolResult, McpError> {
        self.call("extract_hyperlinks", to_args(params.0)?).await
    }
}
