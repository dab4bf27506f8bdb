//! Webcheck Daemon - W3C validation gateway
//!
//! Proxies HTML and CSS validation requests to the W3C services and returns
//! normalized results.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use webcheckd::config::Config;
use webcheckd::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Webcheck Daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    server::run(config).await
}
