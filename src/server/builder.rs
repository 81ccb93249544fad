//! ServerBuilder for fluent API to build the proxy server

use super::handlers::ProxyState;
use super::router::{build_proxy_routes, health_routes, method_not_allowed, not_found};
use crate::config::ProxyConfig;
use crate::upstream::{HttpUpstream, Upstream};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the proxy HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(ProxyConfig::load(None)?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: ProxyConfig,
    upstream: Option<Arc<dyn Upstream>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ProxyConfig::default_config(),
            upstream: None,
            custom_routes: Vec::new(),
        }
    }

    /// Use `config` for the listener, upstream URL and CORS policy
    pub fn with_config(mut self, config: ProxyConfig) -> Self {
        self.config = config;
        self
    }

    /// Forward to `upstream` instead of the configured CRM URL
    pub fn with_upstream(mut self, upstream: impl Upstream + 'static) -> Self {
        self.upstream = Some(Arc::new(upstream));
        self
    }

    /// Add routes that sit next to the proxy endpoints
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Build the handler state
    ///
    /// Falls back to an [`HttpUpstream`] for the configured URL when no
    /// upstream was supplied.
    pub fn build_state(&mut self) -> Result<ProxyState> {
        let upstream = match self.upstream.take() {
            Some(upstream) => upstream,
            None => Arc::new(HttpUpstream::from_config(&self.config.upstream)?),
        };
        Ok(ProxyState { upstream })
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Health check routes
    /// - Proxy routes
    /// - Custom routes
    /// - JSON 404 and 405 fallbacks, request tracing and the CORS layer
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = health_routes().merge(build_proxy_routes(state));
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        app = app
            .fallback(not_found)
            .method_not_allowed_fallback(method_not_allowed)
            .layer(TraceLayer::new_for_http());
        if self.config.cors.allow_any_origin {
            app = app.layer(CorsLayer::permissive());
        }

        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.listen_addr();
        let upstream_url = self.config.upstream.url.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(upstream = %upstream_url, "Proxy listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
