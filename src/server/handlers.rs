//! HTTP handlers for the proxy endpoints
//!
//! Each handler forwards to the upstream CRM and passes its JSON response
//! through untouched. Any upstream failure becomes a 500 carrying the
//! endpoint's fixed message; the cause only reaches the logs.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

use crate::core::error::{Endpoint, PedidosResult, RequestError, UpstreamError};
use crate::upstream::Upstream;

/// Application state shared across handlers
#[derive(Clone)]
pub struct ProxyState {
    pub upstream: Arc<dyn Upstream>,
}

impl ProxyState {
    pub fn new(upstream: impl Upstream + 'static) -> Self {
        Self {
            upstream: Arc::new(upstream),
        }
    }
}

async fn forward<F>(endpoint: Endpoint, call: F) -> PedidosResult<Json<Value>>
where
    F: Future<Output = anyhow::Result<Value>>,
{
    match call.await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            let cause = format!("{:#}", e);
            tracing::error!(endpoint = %endpoint, error = %cause, "upstream call failed");
            Err(UpstreamError { endpoint }.into())
        }
    }
}

fn body(payload: Result<Json<Value>, JsonRejection>) -> PedidosResult<Value> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        RequestError::InvalidBody {
            message: rejection.body_text(),
        }
        .into()
    })
}

/// GET /api/pedidos
pub async fn list_orders(State(state): State<ProxyState>) -> PedidosResult<Json<Value>> {
    forward(Endpoint::ListOrders, state.upstream.list_orders()).await
}

/// GET /api/pedidos/pendientes
pub async fn list_pending_orders(State(state): State<ProxyState>) -> PedidosResult<Json<Value>> {
    forward(Endpoint::ListPendingOrders, state.upstream.list_pending_orders()).await
}

/// GET /api/clientes
pub async fn list_clients(State(state): State<ProxyState>) -> PedidosResult<Json<Value>> {
    forward(Endpoint::ListClients, state.upstream.list_clients()).await
}

/// POST /api/pedidos
pub async fn create_order(
    State(state): State<ProxyState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> PedidosResult<Json<Value>> {
    let order = body(payload)?;
    forward(Endpoint::CreateOrder, state.upstream.create_order(order)).await
}

/// PUT /api/pedidos
pub async fn update_order(
    State(state): State<ProxyState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> PedidosResult<Json<Value>> {
    let order = body(payload)?;
    forward(Endpoint::UpdateOrder, state.upstream.update_order(order)).await
}

/// DELETE /api/pedidos/{id}
pub async fn delete_order(
    State(state): State<ProxyState>,
    Path(id): Path<String>,
) -> PedidosResult<Json<Value>> {
    forward(Endpoint::DeleteOrder, state.upstream.delete_order(&id)).await
}

/// DELETE /api/pedidos/pendientes
///
/// The static `pendientes` route shadows `{id}`; the segment is still taken
/// as the id to delete.
pub async fn delete_order_pendientes(
    State(state): State<ProxyState>,
) -> PedidosResult<Json<Value>> {
    forward(Endpoint::DeleteOrder, state.upstream.delete_order("pendientes")).await
}
