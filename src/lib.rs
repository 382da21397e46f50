//! # browser-tools
//!
//! Page-level browser tools for AI agents: navigate, go back, click, read elements, extract text,
//! extract hyperlinks and report the current URL, each behind one uniform contract.
//!
//! ## Features
//!
//! - **One contract, two modes**: every tool is written once against async engine traits and runs
//!   either from synchronous code (blocking browser) or from async code (async browser)
//! - **Current page resolution**: tools act on the most recently opened tab, creating one if the
//!   browser has none
//! - **Chrome backend**: launch or connect to Chrome/Chromium over the DevTools protocol
//! - **MCP Server**: Model Context Protocol server exposing the tools to AI clients
//!
//! ## Running the MCP Server
//!
//! ```bash
//! # Run headless browser
//! cargo run --bin mcp-server --features mcp-server
//!
//! # Run with visible browser (useful for debugging)
//! cargo run --bin mcp-server --features mcp-server -- --headed
//! ```
//!
//! ## Library Usage
//!
//! ### Blocking
//!
//! ```rust,no_run
//! use browser_tools::{BrowserHandle, BrowserTool, ChromeBrowser, LaunchOptions};
//! use browser_tools::tools::{ExtractTextTool, NavigateTool};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> browser_tools::Result<()> {
//! let chrome = Arc::new(ChromeBrowser::launch(LaunchOptions::default())?);
//! let handle = BrowserHandle::blocking(chrome);
//!
//! BrowserTool::new(NavigateTool, handle.clone()).run(json!({"url": "https://example.com"}))?;
//! let text = BrowserTool::new(ExtractTextTool, handle).run(json!({}))?;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```
//!
//! ### Async, by name
//!
//! ```rust,no_run
//! use browser_tools::{BrowserHandle, ChromeBrowser, LaunchOptions, ThreadedBrowser, ToolRegistry};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # async fn demo() -> browser_tools::Result<()> {
//! let chrome = Arc::new(ChromeBrowser::launch(LaunchOptions::default())?);
//! let handle = BrowserHandle::asynchronous(Arc::new(ThreadedBrowser::new(chrome)));
//! let registry = ToolRegistry::with_defaults();
//!
//! registry.run_async("navigate", json!({"url": "https://example.com"}), &handle).await?;
//! let links = registry.run_async("extract_hyperlinks", json!({"absolute_urls": true}), &handle).await?;
//! println!("{}", links);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`]: engine traits, blocking-to-async adapters and the in-memory engine
//! - [`browser`]: Chrome backend and its configuration
//! - [`handle`]: the blocking/async browser handle
//! - [`resolver`]: current page selection
//! - [`tools`]: the tool contract, registry and tools
//! - [`error`]: Error types and result aliases
//! - [`mcp`]: Model Context Protocol server (requires `mcp-handler` feature)

pub mod browser;
pub mod engine;
pub mod error;
pub mod handle;
pub mod resolver;
pub mod tools;

#[cfg(feature = "mcp-handler")]
pub mod mcp;

pub use browser::{ChromeBrowser, ConnectionOptions, LaunchOptions};
pub use engine::{BlockingBrowser, Browser, ExecutionMode, InlineBrowser, MemoryBrowser, Page};
#[cfg(feature = "tokio")]
pub use engine::ThreadedBrowser;
pub use error::{BrowserError, Result};
pub use handle::BrowserHandle;
pub use tools::{BrowserTool, Tool, ToolContext, ToolRegistry};

#[cfg(feature = "mcp-handler")]
pub use mcp::BrowserServer;
#[cfg(feature = "mcp-handler")]
pub use rmcp::ServiceExt;
