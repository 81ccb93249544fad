//! Upstream CRM backends
//!
//! The proxy treats the CRM as an opaque JSON service. [`HttpUpstream`] talks
//! to the real entry point; [`InMemoryCrm`] stands in for it during
//! development and tests.

pub mod http;
pub mod in_memory;

pub use http::HttpUpstream;
pub use in_memory::InMemoryCrm;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Operations forwarded to the CRM
///
/// Every method returns the CRM's JSON response untouched. Implementations
/// report any failure, including non-success HTTP statuses, as an error.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// List every order
    async fn list_orders(&self) -> Result<Value>;

    /// List orders still pending
    async fn list_pending_orders(&self) -> Result<Value>;

    /// List clients for the selection control
    async fn list_clients(&self) -> Result<Value>;

    /// Create an order from the request body
    async fn create_order(&self, order: Value) -> Result<Value>;

    /// Update an order; the body carries its `id`
    async fn update_order(&self, order: Value) -> Result<Value>;

    /// Delete the order with the given id
    async fn delete_order(&self, id: &str) -> Result<Value>;
}
