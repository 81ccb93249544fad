//! HTTP implementation of [`Upstream`] against a CRM entry point

use super::Upstream;
use crate::config::UpstreamConfig;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::time::Duration;

/// Sub-resource selected through the entry point's query string
#[derive(Debug, Clone, Copy)]
enum Resource<'a> {
    Orders,
    PendingOrders,
    Clients,
    Order(&'a str),
}

/// Forwards every operation to a single CRM URL
///
/// Sub-resources are distinguished by query parameters appended to the
/// configured URL: `pendientes=true`, `clientes` and `id=<id>`.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    client: Client,
    base_url: Url,
}

impl HttpUpstream {
    /// Create an upstream for `base_url` with the HTTP client's defaults
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(base_url, Client::new())
    }

    /// Create an upstream using a preconfigured HTTP client
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("invalid upstream URL: {}", base_url))?;
        Ok(Self { client, base_url })
    }

    /// Build from configuration, applying the timeout when one is set
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("failed to build HTTP client")?;
        Self::with_client(&config.url, client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resource_url(&self, resource: Resource<'_>) -> Url {
        let mut url = self.base_url.clone();
        match resource {
            Resource::Orders => {}
            Resource::PendingOrders => {
                url.query_pairs_mut().append_pair("pendientes", "true");
            }
            Resource::Clients => {
                url.query_pairs_mut().append_key_only("clientes");
            }
            Resource::Order(id) => {
                url.query_pairs_mut().append_pair("id", id);
            }
        }
        url
    }

    async fn send(&self, method: Method, resource: Resource<'_>, body: Option<Value>) -> Result<Value> {
        let url = self.resource_url(resource);
        tracing::debug!(%method, %url, "forwarding to upstream");

        let mut request = self.client.request(method.clone(), url.clone());
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("network error on {} {}", method, url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("HTTP {} on {} {}: {}", status, method, url, body));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("failed to read body of {} {}", method, url))?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        // non-JSON text is passed through as a JSON string
        Ok(serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned())))
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    async fn list_orders(&self) -> Result<Value> {
        self.send(Method::GET, Resource::Orders, None).await
    }

    async fn list_pending_orders(&self) -> Result<Value> {
        self.send(Method::GET, Resource::PendingOrders, None).await
    }

    async fn list_clients(&self) -> Result<Value> {
        self.send(Method::GET, Resource::Clients, None).await
    }

    async fn create_order(&self, order: Value) -> Result<Value> {
        self.send(Method::POST, Resource::Orders, Some(order)).await
    }

    async fn update_order(&self, order: Value) -> Result<Value> {
        self.send(Method::PUT, Resource::Orders, Some(order)).await
    }

    async fn delete_order(&self, id: &str) -> Result<Value> {
        self.send(Method::DELETE, Resource::Order(id), None).await
    }
}
