use crate::engine::Element;
use crate::error::{BrowserError, Result};
use crate::tools::{Tool, ToolContext, Validate};
use async_trait::async_trait;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pseudo-attribute that reads an element's rendered text instead of a DOM attribute
pub const INNER_TEXT: &str = "innerText";

/// Parameters for the get_elements tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GetElementsParams {
    /// CSS selector, such as '*', 'div', 'p', 'a', #id, .classname
    pub selector: String,

    /// Attributes to read from each element; `innerText` reads its rendered text (default: ["innerText"])
    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,
}

fn default_attributes() -> Vec<String> {
    vec![INNER_TEXT.to_string()]
}

impl Validate for GetElementsParams {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.selector.trim().is_empty() {
            return Err("selector must not be empty".to_string());
        }
        if self.attributes.iter().any(|name| name.trim().is_empty()) {
            return Err("attribute names must not be empty".to_string());
        }
        Ok(())
    }
}

/// Tool for reading attributes of every element matching a selector
#[derive(Default)]
pub struct GetElementsTool;

/// Requested attributes present on `element`, in request order. Empty values are kept.
async fn read_attributes(element: &dyn Element, attributes: &[String]) -> Result<IndexMap<String, String>> {
    let mut values = IndexMap::new();
    for name in attributes {
        let value = if name == INNER_TEXT {
            Some(element.inner_text().await?)
        } else {
            element.attribute(name).await?
        };

        if let Some(value) = value {
            values.insert(name.clone(), value);
        }
    }
    Ok(values)
}

#[async_trait]
impl Tool for GetElementsTool {
    type Params = GetElementsParams;

    fn name(&self) -> &str {
        "get_elements"
    }

    fn description(&self) -> &str {
        "Retrieve elements in the current web page matching the given CSS selector"
    }

    async fn execute_typed(&self, params: GetElementsParams, context: &ToolContext<'_>) -> Result<String> {
        let page = context.page().await?;

        let mut results = Vec::new();
        for element in page.query_selector_all(&params.selector).await? {
            results.push(read_attributes(element.as_ref(), &params.attributes).await?);
        }

        serde_json::to_string(&results).map_err(|e| BrowserError::ToolExecutionFailed {
            tool: "get_elements".to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{InlineBrowser, MemoryBrowser, MemoryDocument, MemoryElement};
    use futures::executor::block_on;
    use std::sync::Arc;

    fn run(document: MemoryDocument, args: serde_json::Value) -> Result<String> {
        let engine = Arc::new(MemoryBrowser::new());
        engine.open_page("https://example.com/", document);
        let browser = InlineBrowser::new(engine);
        let context = ToolContext::new(&browser);
        let params: GetElementsParams = serde_json::from_value(args).unwrap();
        block_on(GetElementsTool.execute_typed(params, &context))
    }

    #[test]
    fn test_params_default_attributes() {
        let params: GetElementsParams = serde_json::from_value(serde_json::json!({ "selector": "p" })).unwrap();
        assert_eq!(params.attributes, vec!["innerText".to_string()]);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_validation() {
        let params = GetElementsParams { selector: "".to_string(), attributes: default_attributes() };
        assert!(params.validate().is_err());

        let params = GetElementsParams { selector: "a".to_string(), attributes: vec![" ".to_string()] };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_reads_requested_attributes_in_order() {
        let document = MemoryDocument::new("<html></html>")
            .with_element(
                MemoryElement::new("a")
                    .with_attribute("href", "/docs")
                    .with_attribute("title", "Docs")
                    .with_text("Documentation"),
            )
            .with_element(MemoryElement::new("a").with_attribute("href", "/blog"));

        let output = run(document, serde_json::json!({ "selector": "a", "attributes": ["innerText", "href"] })).unwrap();
        assert_eq!(output, r#"[{"innerText":"Documentation","href":"/docs"},{"href":"/blog"}]"#);
    }

    #[test]
    fn test_one_object_per_match() {
        let document = MemoryDocument::new("<html></html>")
            .with_element(MemoryElement::new("a").with_attribute("href", "/a").with_attribute("title", ""))
            .with_element(MemoryElement::new("a").with_text("no href"))
            .with_element(MemoryElement::new("a").with_attribute("href", ""));

        let output = run(document, serde_json::json!({ "selector": "a", "attributes": ["href", "title"] })).unwrap();
        assert_eq!(output, r#"[{"href":"/a","title":""},{},{"href":""}]"#);
    }

    #[test]
    fn test_inner_text_always_present() {
        let document = MemoryDocument::new("<html></html>")
            .with_element(MemoryElement::new("p").with_text("   "))
            .with_element(MemoryElement::new("p"))
            .with_element(MemoryElement::new("p").with_text("Grüße"));

        let output = run(document, serde_json::json!({ "selector": "p" })).unwrap();
        assert_eq!(output, r#"[{"innerText":"   "},{"innerText":""},{"innerText":"Grüße"}]"#);
    }

    #[test]
    fn test_no_match_is_empty_array() {
        let output = run(MemoryDocument::new("<html></html>"), serde_json::json!({ "selector": "table" })).unwrap();
        assert_eq!(output, "[]");
    }
}
