//! Typed client for the proxy HTTP API
//!
//! One request per call: no retries, no timeout beyond the HTTP client's
//! default, no caching. Failures are logged and returned to the caller.

pub mod error;

pub use error::{ClientError, ClientResult};

use crate::core::order::{Client, NewOrder, Order, OrderStatusUpdate};
use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Proxy base URL the browser application talks to
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Where the client sends its requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the proxy API, ending in `/api`
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Order operations as seen from the user interface
///
/// [`ProxyClient`] is the HTTP implementation; the seam lets the dashboard
/// run against any other source of orders.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Order>>;

    async fn list_pending(&self) -> ClientResult<Vec<Order>>;

    async fn list_clients(&self) -> ClientResult<Vec<Client>>;

    /// Create an order; the response carries the assigned `id`
    async fn create(&self, order: &NewOrder) -> ClientResult<Order>;

    async fn update(&self, update: &OrderStatusUpdate) -> ClientResult<Order>;

    /// Delete an order, returning the CRM's acknowledgement as-is
    async fn delete(&self, id: &str) -> ClientResult<Value>;
}

/// HTTP client for the proxy API
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ProxyClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ClientError::Config(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "{}: not usable as a base URL",
                config.base_url
            )));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Client for a proxy listening at `base_url`
    pub fn with_base_url(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::new(ClientConfig {
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Base URL with `segments` appended, each one percent-encoded
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn call<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(segments).to_string();
        let result = self.execute(method.clone(), &url, body).await;
        if let Err(e) = &result {
            tracing::error!(%method, %url, error = %e, "proxy call failed");
        }
        result
    }

    async fn execute<B, T>(&self, method: Method, url: &str, body: Option<&B>) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|source| ClientError::Transport {
            url: url.to_string(),
            source,
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| String::from_utf8_lossy(&bytes).into_owned());
            return Err(ClientError::Status {
                url: url.to_string(),
                status,
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

/// List responses may come back as `null` when the CRM has nothing to return
fn or_empty<T>(items: Option<Vec<T>>) -> Vec<T> {
    items.unwrap_or_default()
}

#[async_trait]
impl OrderGateway for ProxyClient {
    async fn list(&self) -> ClientResult<Vec<Order>> {
        self.call::<(), _>(Method::GET, &["pedidos"], None)
            .await
            .map(or_empty)
    }

    async fn list_pending(&self) -> ClientResult<Vec<Order>> {
        self.call::<(), _>(Method::GET, &["pedidos", "pendientes"], None)
            .await
            .map(or_empty)
    }

    async fn list_clients(&self) -> ClientResult<Vec<Client>> {
        self.call::<(), _>(Method::GET, &["clientes"], None)
            .await
            .map(or_empty)
    }

    async fn create(&self, order: &NewOrder) -> ClientResult<Order> {
        self.call(Method::POST, &["pedidos"], Some(order)).await
    }

    async fn update(&self, update: &OrderStatusUpdate) -> ClientResult<Order> {
        self.call(Method::PUT, &["pedidos"], Some(update)).await
    }

    async fn delete(&self, id: &str) -> ClientResult<Value> {
        self.call::<(), _>(Method::DELETE, &["pedidos", id], None).await
    }
}
