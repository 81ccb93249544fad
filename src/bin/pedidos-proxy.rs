//! Pedidos proxy server
//!
//! Reads its configuration from the YAML file named by `PEDIDOS_CONFIG`
//! (defaults otherwise), applies `PEDIDOS_*` environment overrides and
//! forwards the `/api` routes to the CRM entry point.

use anyhow::{Context, Result};
use pedidos::config::ProxyConfig;
use pedidos::server::ServerBuilder;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")),
        )
        .with(fmt::layer())
        .init();

    let config_path = std::env::var("PEDIDOS_CONFIG").ok();
    let config = ProxyConfig::load(config_path.as_deref())
        .context("failed to load proxy configuration")?;

    tracing::info!(
        listen = %config.listen_addr(),
        upstream = %config.upstream.url,
        "starting pedidos proxy"
    );

    ServerBuilder::new().with_config(config).serve().await
}
