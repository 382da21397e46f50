use crate::browser::{ChromeBrowser, ConnectionOptions, LaunchOptions};
use crate::engine::ThreadedBrowser;
use crate::error::BrowserError;
use crate::handle::BrowserHandle;
use crate::tools::ToolRegistry;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde_json::Value;
use std::sync::Arc;

/// MCP server exposing the browser tools of one browser
#[derive(Clone)]
pub struct BrowserServer {
    pub(crate) tool_router: ToolRouter<Self>,
    registry: Arc<ToolRegistry>,
    handle: BrowserHandle,
}

impl BrowserServer {
    /// Serve tools over `handle`. A blocking browser is moved behind the tokio blocking pool.
    pub fn new(handle: BrowserHandle) -> Self {
        let handle = match handle {
            BrowserHandle::Blocking(browser) => BrowserHandle::Async(Arc::new(ThreadedBrowser::new(browser))),
            handle => handle,
        };

        Self { tool_router: Self::tool_router(), registry: Arc::new(ToolRegistry::with_defaults()), handle }
    }

    /// Launch a local Chrome and serve tools over it
    pub fn with_options(options: LaunchOptions) -> crate::error::Result<Self> {
        let chrome = ChromeBrowser::launch(options)?;
        Ok(Self::new(BrowserHandle::blocking(Arc::new(chrome))))
    }

    /// Attach to a running Chrome and serve tools over it
    pub fn connect(options: ConnectionOptions) -> crate::error::Result<Self> {
        let chrome = ChromeBrowser::connect(options)?;
        Ok(Self::new(BrowserHandle::blocking(Arc::new(chrome))))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run a registered tool and convert its outcome for MCP clients
    pub(crate) async fn call(&self, name: &str, args: Value) -> Result<CallToolResult, McpError> {
        match self.registry.run_async(name, args, &self.handle).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => Err(convert_error(e)),
        }
    }
}

fn convert_error(error: BrowserError) -> McpError {
    log::warn!("Tool call failed: {}", error);
    if error.is_contract_error() {
        McpError::invalid_params(error.to_string(), None)
    } else {
        McpError::internal_error(error.to_string(), None)
    }
}

#[tool_handler]
impl ServerHandler for BrowserServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Browser tools operating on the current tab: navigate, go back, click, read elements, \
                 extract text and hyperlinks, report the current URL."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
