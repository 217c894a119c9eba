//! Finsight server binary
//!
//! Usage:
//!   finsight --port 8080                      Start the API server
//!   finsight --backend-url http://host/api    Point at the main backend

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use finsight_core::BackendClient;
use finsight_server::{serve, ServerConfig};

#[derive(Parser)]
#[command(name = "finsight", version, about = "Expense forecasting and AI advisory API")]
struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Base URL of the main finance backend (overrides MAIN_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Allowed CORS origins (repeatable)
    #[arg(long = "allow-origin")]
    allowed_origins: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let backend = match cli.backend_url.as_deref() {
        Some(url) => BackendClient::new(url),
        None => BackendClient::from_env(),
    };

    let config = ServerConfig {
        allowed_origins: cli.allowed_origins,
    };

    serve(&cli.host, cli.port, backend, config).await
}
