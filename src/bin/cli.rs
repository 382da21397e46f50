//! Command-line driver for the browser tools
//!
//! Launches (or attaches to) a browser, optionally loads a URL, runs one tool by name and prints
//! its result on stdout.

use anyhow::Context;
use browser_tools::browser::{ChromeBrowser, ConnectionOptions, LaunchOptions};
use browser_tools::{BrowserHandle, ToolRegistry};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "browser-tools")]
#[command(version)]
#[command(about = "Run browser tools from the command line", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H', global = true)]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH", global = true)]
    chrome_path: Option<PathBuf>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR", global = true)]
    user_data_dir: Option<PathBuf>,

    /// WebSocket endpoint of a running browser to attach to instead of launching one
    #[arg(long, value_name = "URL", global = true)]
    ws_endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available tools with their descriptions and argument schemas
    List,

    /// Run one tool and print its result
    Run {
        /// Tool name, e.g. extract_text or extract_hyperlinks
        tool: String,

        /// Navigate here before running the tool
        #[arg(long)]
        url: Option<String>,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

impl Cli {
    fn browser(&self) -> anyhow::Result<ChromeBrowser> {
        if let Some(ws_url) = &self.ws_endpoint {
            return Ok(ChromeBrowser::connect(ConnectionOptions::new(ws_url.clone()))?);
        }

        let mut options = LaunchOptions::new().headless(!self.headed);
        if let Some(path) = &self.chrome_path {
            options = options.chrome_path(path.clone());
        }
        if let Some(dir) = &self.user_data_dir {
            options = options.user_data_dir(dir.clone());
        }
        Ok(ChromeBrowser::launch(options)?)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let registry = ToolRegistry::with_defaults();

    match &cli.command {
        Command::List => {
            let descriptions = registry.descriptions();
            println!("{}", serde_json::to_string_pretty(&descriptions)?);
        }
        Command::Run { tool, url, args } => {
            let args: Value = serde_json::from_str(args).context("--args must be a JSON object")?;
            let handle = BrowserHandle::blocking(Arc::new(cli.browser()?));

            if let Some(url) = url {
                let status = registry.run("navigate", json!({ "url": url }), &handle)?;
                log::info!("{}", status);
            }

            let output = registry.run(tool, args, &handle)?;
            println!("{}", output);
        }
    }

    Ok(())
}
