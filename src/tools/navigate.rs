use crate::error::Result;
use crate::tools::utils::normalize_url;
use crate::tools::{Tool, ToolContext, Validate};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use url::Url;

/// Parameters for the navigate tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct NavigateParams {
    /// URL to navigate to; a missing scheme is filled in (`example.com` -> `https://example.com`)
    pub url: String,
}

impl NavigateParams {
    /// The URL actually loaded
    pub fn normalized_url(&self) -> String {
        normalize_url(&self.url)
    }
}

impl Validate for NavigateParams {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.url.trim().is_empty() {
            return Err("url must not be empty".to_string());
        }

        let normalized = self.normalized_url();
        let parsed = Url::parse(&normalized).map_err(|e| format!("'{}' is not a valid URL: {}", normalized, e))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(format!("URL scheme must be 'http' or 'https', got '{}'", scheme)),
        }
    }
}

/// Tool for navigating the current page to a URL
#[derive(Default)]
pub struct NavigateTool;

#[async_trait]
impl Tool for NavigateTool {
    type Params = NavigateParams;

    fn name(&self) -> &str {
        "navigate"
    }

    fn description(&self) -> &str {
        "Navigate a browser to the specified URL"
    }

    async fn execute_typed(&self, params: NavigateParams, context: &ToolContext<'_>) -> Result<String> {
        let url = params.normalized_url();
        let page = context.page().await?;

        log::info!("Navigating to {}", url);
        let status = page.goto(&url).await?;

        Ok(match status {
            Some(code) => format!("Navigating to {} returned status code {}", url, code),
            None => format!("Navigated to {}", url),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(url: &str) -> NavigateParams {
        NavigateParams { url: url.to_string() }
    }

    #[test]
    fn test_navigate_params_required_url() {
        let result: std::result::Result<NavigateParams, _> = serde_json::from_value(serde_json::json!({}));
        assert!(result.is_err());

        let parsed: NavigateParams =
            serde_json::from_value(serde_json::json!({ "url": "https://example.com", "wait_for_load": false }))
                .unwrap();
        assert_eq!(parsed.url, "https://example.com");
    }

    #[test]
    fn test_validate_accepts_web_urls() {
        assert!(params("https://example.com").validate().is_ok());
        assert!(params("http://localhost:3000/path").validate().is_ok());
        assert!(params("example.com").validate().is_ok());
        assert!(params("localhost:3000").validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_other_schemes() {
        assert!(params("").validate().is_err());
        assert!(params("   ").validate().is_err());
        assert!(params("file:///etc/passwd").validate().unwrap_err().contains("'file'"));
        assert!(params("about:blank").validate().is_err());
        assert!(params("/relative/path").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_explicit_non_web_schemes() {
        assert!(params("ftp://x.com/file").validate().unwrap_err().contains("'ftp'"));
        assert!(params("mailto:someone@x.com").validate().unwrap_err().contains("'mailto'"));
        assert!(params("javascript:alert(1)").validate().is_err());
        assert_eq!(params("ftp://x.com/file").normalized_url(), "ftp://x.com/file");
    }

    #[test]
    fn test_normalized_url() {
        assert_eq!(params("  example.com ").normalized_url(), "https://example.com");
        assert_eq!(params("google").normalized_url(), "https://www.google.com");
    }

    #[test]
    fn test_navigate_tool_metadata() {
        let tool = NavigateTool;
        assert_eq!(tool.name(), "navigate");
        let schema = tool.parameters_schema();
        assert!(schema.is_object());
    }
}
