use browser_tools::{BrowserHandle, BrowserTool, ChromeBrowser, LaunchOptions, ToolRegistry};
use browser_tools::tools::{ExtractHyperlinksTool, ExtractTextTool};
use serde_json::json;
use std::sync::Arc;

fn launch() -> BrowserHandle {
    let chrome = ChromeBrowser::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");
    BrowserHandle::blocking(Arc::new(chrome))
}

fn load(handle: &BrowserHandle, html: &str) {
    let page = handle.resolve_page().expect("Failed to resolve page");
    let url = format!("data:text/html,{}", urlencoding::encode(html));
    futures::executor::block_on(page.goto(&url)).expect("Failed to navigate");
}

#[test]
#[ignore] // Requires Chrome to be installed
fn test_extract_text() {
    let handle = launch();
    load(&handle, "<html><head><title>T</title></head><body><h1>Main Title</h1><p>Para</p></body></html>");

    let text = BrowserTool::new(ExtractTextTool, handle).run(json!({})).expect("Failed to extract text");
    assert!(text.contains("Main Title"));
    assert!(text.contains("Para"));
    assert!(!text.contains("<h1>"));
}

#[test]
#[ignore]
fn test_extract_hyperlinks() {
    let handle = launch();
    let html = concat!(
        "<html><body>",
        "<a href=\"https://example.com\">Example</a>",
        "<a href=\"/path\">Relative</a>",
        "<a href=\"#anchor\">Anchor</a>",
        "<a href=\"https://example.com\">Duplicate</a>",
        "<a>No Href</a>",
        "<a href=\"\">Empty</a>",
        "</body></html>"
    );
    load(&handle, html);

    let output = BrowserTool::new(ExtractHyperlinksTool, handle).run(json!({})).expect("Failed to extract links");
    let links: Vec<String> = serde_json::from_str(&output).unwrap();
    assert_eq!(links, vec!["#anchor", "/path", "https://example.com"]);
}

#[test]
#[ignore]
fn test_get_elements_and_click() {
    let handle = launch();
    load(
        &handle,
        "<html><body><button id='btn' onclick=\"this.textContent='Done'\">Press</button></body></html>",
    );
    let registry = ToolRegistry::with_defaults();

    registry.run("click_element", json!({ "selector": "#btn" }), &handle).expect("Failed to click");

    let output = registry
        .run("get_elements", json!({ "selector": "#btn", "attributes": ["innerText", "id"] }), &handle)
        .expect("Failed to get elements");
    assert_eq!(output, r#"[{"innerText":"Done","id":"btn"}]"#);
}

#[test]
#[ignore]
fn test_current_page_after_launch() {
    let handle = launch();
    let registry = ToolRegistry::with_defaults();

    let url = registry.run("current_webpage", json!({}), &handle).expect("Failed to read URL");
    assert_eq!(url, "about:blank");
}
