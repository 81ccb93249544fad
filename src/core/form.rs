//! Order form draft state
//!
//! The form keeps every field exactly as typed. Submission turns the draft
//! into a [`NewOrder`] payload after validation; I/O is left to the caller.

use crate::core::dates::to_backend_format;
use crate::core::error::ValidationError;
use crate::core::order::{NewOrder, OrderStatus};
use crate::core::validation::{FieldErrors, validate_order};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Editable fields of the order form, by wire name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderField {
    NumeroPedido,
    FechaPedido,
    Cliente,
    EstadoPedido,
    FechaEntregaEstimada,
    TotalPedido,
    NotasPedido,
}

impl OrderField {
    pub const ALL: [OrderField; 7] = [
        OrderField::NumeroPedido,
        OrderField::FechaPedido,
        OrderField::Cliente,
        OrderField::EstadoPedido,
        OrderField::FechaEntregaEstimada,
        OrderField::TotalPedido,
        OrderField::NotasPedido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::NumeroPedido => "numero_pedido",
            OrderField::FechaPedido => "fecha_pedido",
            OrderField::Cliente => "cliente",
            OrderField::EstadoPedido => "estado_pedido",
            OrderField::FechaEntregaEstimada => "fecha_entrega_estimada",
            OrderField::TotalPedido => "total_pedido",
            OrderField::NotasPedido => "notas_pedido",
        }
    }

    /// Look a field up by its wire name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated form contents
///
/// Dates are ISO `yyyy-mm-dd` as produced by date inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub numero_pedido: String,
    pub fecha_pedido: String,
    pub cliente: String,
    pub estado_pedido: String,
    pub fecha_entrega_estimada: String,
    pub total_pedido: String,
    pub notas_pedido: String,
}

impl Default for OrderDraft {
    fn default() -> Self {
        Self {
            numero_pedido: String::new(),
            fecha_pedido: String::new(),
            cliente: String::new(),
            estado_pedido: OrderStatus::default().to_string(),
            fecha_entrega_estimada: String::new(),
            total_pedido: String::new(),
            notas_pedido: String::new(),
        }
    }
}

impl OrderDraft {
    pub fn set(&mut self, field: OrderField, value: impl Into<String>) {
        let slot = match field {
            OrderField::NumeroPedido => &mut self.numero_pedido,
            OrderField::FechaPedido => &mut self.fecha_pedido,
            OrderField::Cliente => &mut self.cliente,
            OrderField::EstadoPedido => &mut self.estado_pedido,
            OrderField::FechaEntregaEstimada => &mut self.fecha_entrega_estimada,
            OrderField::TotalPedido => &mut self.total_pedido,
            OrderField::NotasPedido => &mut self.notas_pedido,
        };
        *slot = value.into();
    }

    /// Build the create payload
    ///
    /// `fecha_pedido` is converted to backend format while
    /// `fecha_entrega_estimada` is sent exactly as entered.
    pub fn to_payload(&self) -> NewOrder {
        NewOrder {
            numero_pedido: self.numero_pedido.clone(),
            fecha_pedido: to_backend_format(&self.fecha_pedido),
            cliente: self.cliente.clone(),
            estado_pedido: OrderStatus::from(self.estado_pedido.clone()),
            fecha_entrega_estimada: self.fecha_entrega_estimada.clone(),
            total_pedido: self.total_pedido.clone(),
            notas_pedido: self.notas_pedido.clone(),
        }
    }
}

/// Order creation form: draft plus per-field and form-level errors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderForm {
    pub draft: OrderDraft,
    pub errors: FieldErrors,
    /// Form-level error banner (failed submission, failed client load)
    pub error: Option<String>,
    pub submitting: bool,
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value typed by the user and clear that field's error
    pub fn set_field(&mut self, field: OrderField, value: impl Into<String>) {
        self.draft.set(field, value);
        self.errors.shift_remove(field.as_str());
    }

    /// Re-run validation, keeping the resulting errors
    pub fn validate(&mut self) -> bool {
        self.errors = validate_order(&self.draft);
        self.errors.is_empty()
    }

    pub fn field_error(&self, field: OrderField) -> Option<&str> {
        self.errors.get(field.as_str()).map(String::as_str)
    }

    /// Validate and, when valid, produce the payload to send
    pub fn try_payload(&mut self) -> Result<NewOrder, ValidationError> {
        if self.validate() {
            Ok(self.draft.to_payload())
        } else {
            Err(ValidationError(self.errors.clone()))
        }
    }

    pub fn payload(&mut self) -> Option<NewOrder> {
        self.try_payload().ok()
    }

    /// Back to an empty draft after a successful submission
    pub fn reset(&mut self) {
        self.draft = OrderDraft::default();
        self.errors.clear();
    }
}
