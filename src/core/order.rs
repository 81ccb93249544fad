//! Order (pedido) and client (cliente) records as exchanged with the CRM

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an order
///
/// The CRM is the source of truth for statuses; any value outside the three
/// known ones is kept verbatim in `Other` so a listing never fails to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pendiente,
    Pagado,
    Atrasado,
    Other(String),
}

impl OrderStatus {
    /// The three statuses offered by the status selector, in display order
    pub const SELECTABLE: [OrderStatus; 3] = [
        OrderStatus::Pendiente,
        OrderStatus::Pagado,
        OrderStatus::Atrasado,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pendiente => "Pendiente",
            OrderStatus::Pagado => "Pagado",
            OrderStatus::Atrasado => "Atrasado",
            OrderStatus::Other(s) => s,
        }
    }

    /// Whether this is one of the statuses the CRM entry point understands
    pub fn is_known(&self) -> bool {
        !matches!(self, OrderStatus::Other(_))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for OrderStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pendiente" => OrderStatus::Pendiente,
            "Pagado" => OrderStatus::Pagado,
            "Atrasado" => OrderStatus::Atrasado,
            _ => OrderStatus::Other(value),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(OrderStatus::from(s.to_string()))
    }
}

/// An order as listed by the CRM
///
/// Every field defaults when absent so partial CRM records still decode.
/// Dates are kept as the strings the CRM sent; see [`crate::core::dates`]
/// for conversions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Order {
    /// Opaque identifier assigned by the CRM, absent until created
    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub numero_pedido: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub fecha_pedido: String,

    /// Client identifier
    #[serde(default, deserialize_with = "string_or_number")]
    pub cliente: String,

    /// `null` or absent means the default status
    #[serde(default, deserialize_with = "status_or_default")]
    pub estado_pedido: OrderStatus,

    #[serde(default, deserialize_with = "string_or_number")]
    pub fecha_entrega_estimada: String,

    #[serde(default, deserialize_with = "string_or_number")]
    pub total_pedido: String,

    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub notas_pedido: Option<String>,
}

/// Body of a create call: an order without its identifier
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewOrder {
    pub numero_pedido: String,
    pub fecha_pedido: String,
    pub cliente: String,
    pub estado_pedido: OrderStatus,
    pub fecha_entrega_estimada: String,
    pub total_pedido: String,
    pub notas_pedido: String,
}

/// Body of an update call issued from the orders table
///
/// Changing the status carries over the existing notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub id: String,
    pub estado_pedido: OrderStatus,
    pub notas_pedido: String,
}

impl OrderStatusUpdate {
    /// Build the update for moving `order` to `status`
    ///
    /// Returns `None` when the order has not been persisted yet or already has
    /// that status, in which case no call should be made.
    pub fn for_order(order: &Order, status: OrderStatus) -> Option<Self> {
        let id = order.id.as_ref()?;
        if order.estado_pedido == status {
            return None;
        }
        Some(Self {
            id: id.clone(),
            estado_pedido: status,
            notas_pedido: order.notas_pedido.clone().unwrap_or_default(),
        })
    }
}

/// Read-only client reference data for the client selector
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Client {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub first_name: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub last_name: String,
}

impl Client {
    /// Label shown in the selector
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

fn status_or_default<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(OrderStatus::from).unwrap_or_default())
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).filter(|s| !s.is_empty()))
}
