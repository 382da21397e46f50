//! Browser tools MCP Server
//!
//! Exposes the browser tools to AI assistants and other MCP clients, over stdio or streamable HTTP.

use browser_tools::browser::{ConnectionOptions, LaunchOptions};
use browser_tools::mcp::BrowserServer;
use clap::{Parser, ValueEnum};
use rmcp::{
    ServiceExt,
    transport::stdio,
    transport::streamable_http_server::{StreamableHttpService, session::local::LocalSessionManager},
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Transport {
    /// Standard input/output transport (default)
    Stdio,
    /// HTTP streamable transport
    Http,
}

#[derive(Parser)]
#[command(name = "mcp-server")]
#[command(version)]
#[command(about = "Browser tools MCP server", long_about = None)]
struct Cli {
    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    executable_path: Option<PathBuf>,

    /// WebSocket endpoint of a running browser to attach to instead of launching one
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Transport type to use
    #[arg(long, short = 't', value_enum, default_value = "stdio")]
    transport: Transport,

    /// Port for HTTP transport
    #[arg(long, short = 'p', default_value = "3000")]
    port: u16,

    /// HTTP streamable endpoint path
    #[arg(long, default_value = "/mcp")]
    http_path: String,
}

impl Cli {
    fn server(&self) -> browser_tools::Result<BrowserServer> {
        if let Some(ws_url) = &self.ws_endpoint {
            return BrowserServer::connect(ConnectionOptions::new(ws_url.clone()));
        }

        let mut options = LaunchOptions::new().headless(!self.headed);
        if let Some(path) = &self.executable_path {
            options = options.chrome_path(path.clone());
        }
        if let Some(dir) = &self.user_data_dir {
            options = options.user_data_dir(dir.clone());
        }
        BrowserServer::with_options(options)
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    // stdout belongs to the MCP transport; logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    log::info!("Browser tools MCP Server v{}", env!("CARGO_PKG_VERSION"));

    match cli.transport {
        Transport::Stdio => {
            let service = cli.server()?;
            log::info!("Ready to accept MCP connections via stdio");
            let server = service.serve(stdio()).await?;
            let quit_reason = server.waiting().await?;
            log::info!("Server quit with reason: {:?}", quit_reason);
        }
        Transport::Http => {
            let bind_addr = format!("127.0.0.1:{}", cli.port);

            // One browser shared by every MCP session
            let service = cli.server()?;
            let http_service = StreamableHttpService::new(
                move || Ok(service.clone()),
                LocalSessionManager::default().into(),
                Default::default(),
            );
            let router = axum::Router::new().nest_service(&cli.http_path, http_service);

            log::info!("Ready to accept MCP connections at http://{}{}", bind_addr, cli.http_path);
            let listener = tokio::net::TcpListener::bind(bind_addr).await?;
            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
