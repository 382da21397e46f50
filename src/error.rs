use crate::engine::ExecutionMode;
use thiserror::Error;

/// Errors raised by the tool layer and the browser engines behind it
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("{tool}: either a blocking or an async browser must be provided")]
    NoHandleProvided { tool: String },

    #[error("{tool}: both a blocking and an async browser were provided, pick one")]
    AmbiguousHandle { tool: String },

    #[error("{tool}: no {mode} browser bound to this tool")]
    MissingHandle { tool: String, mode: ExecutionMode },

    #[error("{tool}: invalid arguments: {reason}")]
    InvalidArgument { tool: String, reason: String },

    #[error("Browser engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Page unavailable: {0}")]
    PageUnavailable(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("No previous page in the history: {0}")]
    NoHistory(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{tool}' failed: {reason}")]
    ToolExecutionFailed { tool: String, reason: String },
}

impl BrowserError {
    /// True for errors raised before the engine was touched
    pub fn is_contract_error(&self) -> bool {
        matches!(
            self,
            BrowserError::NoHandleProvided { .. }
                | BrowserError::AmbiguousHandle { .. }
                | BrowserError::MissingHandle { .. }
                | BrowserError::InvalidArgument { .. }
                | BrowserError::UnknownTool(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_tool_name() {
        let err = BrowserError::MissingHandle { tool: "extract_text".to_string(), mode: ExecutionMode::Blocking };
        assert_eq!(err.to_string(), "extract_text: no blocking browser bound to this tool");

        let err = BrowserError::InvalidArgument { tool: "navigate".to_string(), reason: "missing field `url`".to_string() };
        assert!(err.to_string().starts_with("navigate:"));
    }

    #[test]
    fn test_contract_errors() {
        assert!(BrowserError::NoHandleProvided { tool: "click_element".to_string() }.is_contract_error());
        assert!(!BrowserError::ElementNotFound("#missing".to_string()).is_contract_error());
        assert!(!BrowserError::EngineUnavailable("gone".to_string()).is_contract_error());
    }
}
