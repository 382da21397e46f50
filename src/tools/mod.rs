//! Browser tools
//!
//! Every tool is written once, as an async operation against the [`Browser`] trait. A tool bound to a
//! [`BrowserHandle`] through [`BrowserTool`] can then be run from synchronous code ([`BrowserTool::run`],
//! blocking handle required) or from async code ([`BrowserTool::run_async`], async handle required);
//! both go through the same `execute_typed`, so the two modes cannot drift apart.
//!
//! Arguments arrive as JSON, are deserialized into the tool's typed params and checked by
//! [`Validate::validate`] before any engine call is made.

pub mod click;
pub mod current_page;
pub mod extract_hyperlinks;
pub mod extract_text;
pub mod get_elements;
pub mod navigate;
pub mod navigate_back;
pub mod utils;

pub use click::{ClickParams, ClickTool};
pub use current_page::{CurrentPageParams, CurrentPageTool};
pub use extract_hyperlinks::{ExtractHyperlinksParams, ExtractHyperlinksTool};
pub use extract_text::{ExtractTextParams, ExtractTextTool};
pub use get_elements::{GetElementsParams, GetElementsTool};
pub use navigate::{NavigateParams, NavigateTool};
pub use navigate_back::{NavigateBackParams, NavigateBackTool};

use crate::engine::{BlockingBrowser, Browser, Page};
use crate::error::{BrowserError, Result};
use crate::handle::BrowserHandle;
use crate::resolver;
use async_trait::async_trait;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::sync::Arc;

/// Static validation of a tool's params, run after deserialization and before execution
pub trait Validate {
    fn validate(&self) -> std::result::Result<(), String> {
        Ok(())
    }
}

/// What a tool sees while it runs
pub struct ToolContext<'a> {
    /// Browser the tool operates on, always driven through the async traits
    pub browser: &'a dyn Browser,
}

impl<'a> ToolContext<'a> {
    pub fn new(browser: &'a dyn Browser) -> Self {
        Self { browser }
    }

    /// Resolve the page to operate on
    pub async fn page(&self) -> Result<Arc<dyn Page>> {
        resolver::current_page(self.browser).await
    }
}

/// A named, schema-validated browser operation
#[async_trait]
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema + Validate + Send + 'static;

    fn name(&self) -> &str;

    /// Summary for tool-selection logic; not used during execution
    fn description(&self) -> &str;

    /// JSON Schema of [`Tool::Params`]
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or(Value::Null)
    }

    async fn execute_typed(&self, params: Self::Params, context: &ToolContext<'_>) -> Result<String>;
}

/// Deserialize and validate JSON arguments for `tool`
pub fn parse_params<P>(tool: &str, args: Value) -> Result<P>
where
    P: DeserializeOwned + Validate,
{
    let args = if args.is_null() { Value::Object(Default::default()) } else { args };
    let params: P = serde_json::from_value(args)
        .map_err(|e| BrowserError::InvalidArgument { tool: tool.to_string(), reason: e.to_string() })?;
    validated(tool, params)
}

/// Type-erased [`Tool`], taking JSON arguments
#[async_trait]
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn parameters_schema(&self) -> Value;

    /// Parse `args`, then run from synchronous code on a blocking handle
    fn call(&self, args: Value, handle: &BrowserHandle) -> Result<String>;

    /// Parse `args`, then run from async code on an async handle
    async fn call_async(&self, args: Value, handle: &BrowserHandle) -> Result<String>;
}

#[async_trait]
impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(self)
    }

    fn call(&self, args: Value, handle: &BrowserHandle) -> Result<String> {
        let params = parse_params::<T::Params>(Tool::name(self), args)?;
        execute_blocking(self, params, handle)
    }

    async fn call_async(&self, args: Value, handle: &BrowserHandle) -> Result<String> {
        let params = parse_params::<T::Params>(Tool::name(self), args)?;
        execute_async(self, params, handle).await
    }
}

// Params are already validated; the mode check comes next, before any engine call.
fn execute_blocking<T: Tool>(tool: &T, params: T::Params, handle: &BrowserHandle) -> Result<String> {
    let browser = handle.inline(Tool::name(tool))?;
    let context = ToolContext::new(&browser);
    log::debug!("Executing tool '{}'", Tool::name(tool));
    futures::executor::block_on(tool.execute_typed(params, &context))
}

async fn execute_async<T: Tool>(tool: &T, params: T::Params, handle: &BrowserHandle) -> Result<String> {
    let browser = handle.async_browser(Tool::name(tool))?;
    let context = ToolContext::new(browser.as_ref());
    log::debug!("Executing tool '{}'", Tool::name(tool));
    tool.execute_typed(params, &context).await
}

fn validated<P: Validate>(tool: &str, params: P) -> Result<P> {
    params
        .validate()
        .map_err(|reason| BrowserError::InvalidArgument { tool: tool.to_string(), reason })?;
    Ok(params)
}

/// A tool bound to a browser
pub struct BrowserTool<T> {
    tool: T,
    handle: BrowserHandle,
}

impl<T: Tool> BrowserTool<T> {
    pub fn new(tool: T, handle: BrowserHandle) -> Self {
        Self { tool, handle }
    }

    /// Bind to whichever browser is given; fails with `NoHandleProvided` when neither is
    pub fn from_browsers(
        tool: T,
        blocking: Option<Arc<dyn BlockingBrowser>>,
        asynchronous: Option<Arc<dyn Browser>>,
    ) -> Result<Self> {
        let handle = BrowserHandle::from_browsers(Tool::name(&tool), blocking, asynchronous)?;
        Ok(Self { tool, handle })
    }

    pub fn tool(&self) -> &T {
        &self.tool
    }

    pub fn handle(&self) -> &BrowserHandle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        Tool::name(&self.tool)
    }

    pub fn description(&self) -> &str {
        Tool::description(&self.tool)
    }

    pub fn parameters_schema(&self) -> Value {
        Tool::parameters_schema(&self.tool)
    }

    /// Run from synchronous code with JSON arguments
    pub fn run(&self, args: Value) -> Result<String> {
        self.tool.call(args, &self.handle)
    }

    /// Run from async code with JSON arguments
    pub async fn run_async(&self, args: Value) -> Result<String> {
        self.tool.call_async(args, &self.handle).await
    }

    /// Run from synchronous code with typed params
    pub fn run_typed(&self, params: T::Params) -> Result<String> {
        let params = validated(self.name(), params)?;
        execute_blocking(&self.tool, params, &self.handle)
    }

    /// Run from async code with typed params
    pub async fn run_typed_async(&self, params: T::Params) -> Result<String> {
        let params = validated(self.name(), params)?;
        execute_async(&self.tool, params, &self.handle).await
    }
}

/// Name, description and parameter schema of a registered tool
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescription {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tools addressable by name
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self { tools: IndexMap::new() }
    }

    /// Registry holding every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NavigateTool);
        registry.register(NavigateBackTool);
        registry.register(ClickTool);
        registry.register(GetElementsTool);
        registry.register(CurrentPageTool);
        registry.register(ExtractTextTool);
        registry.register(ExtractHyperlinksTool);
        registry
    }

    /// Add a tool, replacing any tool registered under the same name
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(Tool::name(&tool).to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    pub fn descriptions(&self) -> Vec<ToolDescription> {
        self.tools
            .values()
            .map(|tool| ToolDescription {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn lookup(&self, name: &str) -> Result<&dyn DynTool> {
        self.get(name).ok_or_else(|| BrowserError::UnknownTool(name.to_string()))
    }

    /// Run a tool by name from synchronous code
    pub fn run(&self, name: &str, args: Value, handle: &BrowserHandle) -> Result<String> {
        self.lookup(name)?.call(args, handle)
    }

    /// Run a tool by name from async code
    pub async fn run_async(&self, name: &str, args: Value, handle: &BrowserHandle) -> Result<String> {
        self.lookup(name)?.call_async(args, handle).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryBrowser;
    use crate::engine::ExecutionMode;

    #[test]
    fn test_registry_defaults() {
        let registry = ToolRegistry::with_defaults();
        assert_eq!(
            registry.names(),
            vec![
                "navigate",
                "previous_webpage",
                "click_element",
                "get_elements",
                "current_webpage",
                "extract_text",
                "extract_hyperlinks"
            ]
        );

        for description in registry.descriptions() {
            assert!(!description.description.is_empty());
            assert!(description.parameters.is_object(), "{} has no schema", description.name);
        }
    }

    #[test]
    fn test_registry_unknown_tool() {
        let registry = ToolRegistry::with_defaults();
        let handle = BrowserHandle::blocking(Arc::new(MemoryBrowser::new()));

        let result = registry.run("screenshot", Value::Null, &handle);
        assert!(matches!(result, Err(BrowserError::UnknownTool(name)) if name == "screenshot"));
    }

    #[test]
    fn test_parse_params_null_means_no_arguments() {
        let params: ExtractHyperlinksParams = parse_params("extract_hyperlinks", Value::Null).unwrap();
        assert!(!params.absolute_urls);
    }

    #[test]
    fn test_parse_params_wrong_type() {
        let result: Result<ExtractHyperlinksParams> =
            parse_params("extract_hyperlinks", serde_json::json!({ "absolute_urls": "yes" }));
        assert!(matches!(result, Err(BrowserError::InvalidArgument { tool, .. }) if tool == "extract_hyperlinks"));
    }

    #[test]
    fn test_validation_precedes_mode_check() {
        let asynchronous: Arc<dyn Browser> = Arc::new(crate::engine::InlineBrowser::new(Arc::new(MemoryBrowser::new())));
        let tool = BrowserTool::new(NavigateTool, BrowserHandle::asynchronous(asynchronous));

        assert!(matches!(tool.run(serde_json::json!({})), Err(BrowserError::InvalidArgument { .. })));
        assert!(matches!(
            tool.run(serde_json::json!({ "url": "https://example.com" })),
            Err(BrowserError::MissingHandle { mode: ExecutionMode::Blocking, .. })
        ));
    }
}
