//! Router builder utilities for the proxy routes

use super::handlers::{
    ProxyState, create_order, delete_order, delete_order_pendientes, list_clients, list_orders,
    list_pending_orders, update_order,
};
use crate::core::error::{PedidosError, RequestError};
use axum::{
    Json, Router,
    http::{Method, Uri},
    routing::get,
};
use serde_json::{Value, json};

/// Build the proxy routes
///
/// - GET /api/pedidos - List all orders
/// - POST /api/pedidos - Create an order
/// - PUT /api/pedidos - Update an order (body carries `id`)
/// - GET /api/pedidos/pendientes - List pending orders
/// - DELETE /api/pedidos/{id} - Delete an order (including id `pendientes`)
/// - GET /api/clientes - List clients
pub fn build_proxy_routes(state: ProxyState) -> Router {
    Router::new()
        .route(
            "/api/pedidos",
            get(list_orders).post(create_order).put(update_order),
        )
        .route(
            "/api/pedidos/pendientes",
            get(list_pending_orders).delete(delete_order_pendientes),
        )
        .route("/api/pedidos/{id}", axum::routing::delete(delete_order))
        .route("/api/clientes", get(list_clients))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "pedidos-proxy"
    }))
}

/// Fallback for unknown paths, keeping the `{"error": ...}` envelope
pub async fn not_found(uri: Uri) -> PedidosError {
    RequestError::NotFound {
        path: uri.path().to_string(),
    }
    .into()
}

/// Fallback for known paths hit with an unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> PedidosError {
    RequestError::MethodNotAllowed {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
    .into()
}
