//! In-memory CRM stand-in for testing and development

use super::Upstream;
use crate::core::order::OrderStatus;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory CRM implementation
///
/// Orders are stored as JSON objects in insertion order. Uses RwLock for
/// thread-safe access; clones share the same data.
#[derive(Clone, Default)]
pub struct InMemoryCrm {
    orders: Arc<RwLock<Vec<Map<String, Value>>>>,
    clients: Arc<RwLock<Vec<Value>>>,
}

impl InMemoryCrm {
    /// Create an empty CRM
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a CRM whose client list is `clients`
    pub fn with_clients(clients: Vec<Value>) -> Self {
        Self {
            orders: Arc::default(),
            clients: Arc::new(RwLock::new(clients)),
        }
    }

    /// A CRM preloaded with a few clients
    pub fn seeded() -> Self {
        Self::with_clients(vec![
            json!({ "id": "c-1", "first_name": "Ana", "last_name": "Gómez" }),
            json!({ "id": "c-2", "first_name": "Luis", "last_name": "Pérez" }),
            json!({ "id": "c-3", "first_name": "Marta", "last_name": "Ríos" }),
        ])
    }

    /// Number of stored orders
    pub fn len(&self) -> usize {
        self.orders.read().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn into_object(order: Value) -> Result<Map<String, Value>> {
        match order {
            Value::Object(map) => Ok(map),
            other => Err(anyhow!("order must be a JSON object, got {}", other)),
        }
    }

    fn id_of(order: &Map<String, Value>) -> Option<String> {
        match order.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[async_trait]
impl Upstream for InMemoryCrm {
    async fn list_orders(&self) -> Result<Value> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(Value::Array(
            orders.iter().cloned().map(Value::Object).collect(),
        ))
    }

    async fn list_pending_orders(&self) -> Result<Value> {
        let orders = self
            .orders
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let pending = OrderStatus::Pendiente;
        Ok(Value::Array(
            orders
                .iter()
                .filter(|o| o.get("estado_pedido").and_then(Value::as_str) == Some(pending.as_str()))
                .cloned()
                .map(Value::Object)
                .collect(),
        ))
    }

    async fn list_clients(&self) -> Result<Value> {
        let clients = self
            .clients
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(Value::Array(clients.clone()))
    }

    async fn create_order(&self, order: Value) -> Result<Value> {
        let mut order = Self::into_object(order)?;
        order.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));

        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        orders.push(order.clone());

        Ok(Value::Object(order))
    }

    async fn update_order(&self, order: Value) -> Result<Value> {
        let changes = Self::into_object(order)?;
        let id = Self::id_of(&changes).ok_or_else(|| anyhow!("update requires an id"))?;

        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let stored = orders
            .iter_mut()
            .find(|o| Self::id_of(o).as_deref() == Some(id.as_str()))
            .ok_or_else(|| anyhow!("order not found: {}", id))?;

        for (key, value) in changes {
            if key != "id" {
                stored.insert(key, value);
            }
        }

        Ok(Value::Object(stored.clone()))
    }

    async fn delete_order(&self, id: &str) -> Result<Value> {
        let mut orders = self
            .orders
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let before = orders.len();
        orders.retain(|o| Self::id_of(o).as_deref() != Some(id));
        if orders.len() == before {
            return Err(anyhow!("order not found: {}", id));
        }

        Ok(json!({ "success": true, "id": id }))
    }
}
