//! Order draft validation
//!
//! Validation is a pure function from a draft to the set of violated rules,
//! keyed by field name. An empty map means the draft can be submitted.

pub mod validators;

use crate::core::form::{OrderDraft, OrderField};
use indexmap::IndexMap;
use validators::{known_status, positive_number, required, required_trimmed};

/// Field name to error message, in form order
pub type FieldErrors = IndexMap<String, String>;

pub const MSG_NUMERO_REQUIRED: &str = "El número de pedido es requerido";
pub const MSG_FECHA_REQUIRED: &str = "La fecha de pedido es requerida";
pub const MSG_CLIENTE_REQUIRED: &str = "El ID del cliente es requerido";
pub const MSG_ESTADO_REQUIRED: &str = "El estado es requerido";
pub const MSG_ESTADO_INVALID: &str = "El estado no es válido";
pub const MSG_ENTREGA_REQUIRED: &str = "La fecha de entrega estimada es requerida";
pub const MSG_TOTAL_POSITIVE: &str = "El total del pedido debe ser mayor a 0";

/// Check every rule against `draft`
///
/// Each field reports at most one message, the first rule it fails.
pub fn validate_order(draft: &OrderDraft) -> FieldErrors {
    let checks: [(OrderField, Result<(), String>); 6] = [
        (
            OrderField::NumeroPedido,
            required_trimmed(MSG_NUMERO_REQUIRED)(&draft.numero_pedido),
        ),
        (
            OrderField::FechaPedido,
            required(MSG_FECHA_REQUIRED)(&draft.fecha_pedido),
        ),
        (
            OrderField::Cliente,
            required_trimmed(MSG_CLIENTE_REQUIRED)(&draft.cliente),
        ),
        (
            OrderField::EstadoPedido,
            required(MSG_ESTADO_REQUIRED)(&draft.estado_pedido)
                .and_then(|_| known_status(MSG_ESTADO_INVALID)(&draft.estado_pedido)),
        ),
        (
            OrderField::FechaEntregaEstimada,
            required(MSG_ENTREGA_REQUIRED)(&draft.fecha_entrega_estimada),
        ),
        (
            OrderField::TotalPedido,
            positive_number(MSG_TOTAL_POSITIVE)(&draft.total_pedido),
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(field, result)| result.err().map(|msg| (field.as_str().to_string(), msg)))
        .collect()
}
