//! Server module for the CRM proxy
//!
//! This module provides a `ServerBuilder` that registers:
//! - The six proxy routes under `/api`
//! - Health check routes
//! - CORS and request tracing layers

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::ProxyState;
pub use router::build_proxy_routes;
