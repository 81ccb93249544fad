//! Presentation helpers for the orders table

use crate::core::dates::to_display_format;
use crate::core::order::{Order, OrderStatus};
use serde::Serialize;

/// Maximum number of characters of the notes shown inline
pub const NOTES_PREVIEW_LEN: usize = 30;

/// Format an order total as Colombian pesos, e.g. `$ 150.000`
///
/// Uses `.` as thousands separator and `,` for decimals, with no minimum
/// fraction digits and at most two. Input that is not a number is returned
/// unchanged.
pub fn format_total(raw: &str) -> String {
    let Ok(value) = raw.trim().parse::<f64>() else {
        return raw.to_string();
    };
    if !value.is_finite() {
        return raw.to_string();
    }

    let formatted = format!("{:.2}", value.abs());
    let (integer_part, decimal_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), ""));

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    let decimals = decimal_part.trim_end_matches('0');
    // values that round to zero carry no sign
    let rounded = (value * 100.0).round() / 100.0;
    let sign = if rounded < 0.0 { "-" } else { "" };

    if decimals.is_empty() {
        format!("{}$ {}", sign, grouped)
    } else {
        format!("{}$ {},{}", sign, grouped, decimals)
    }
}

/// Short form of the notes for the table cell
///
/// Returns `None` when there is nothing to show.
pub fn notes_preview(notes: Option<&str>) -> Option<String> {
    let notes = notes.filter(|n| !n.is_empty())?;
    if notes.chars().count() > NOTES_PREVIEW_LEN {
        let head: String = notes.chars().take(NOTES_PREVIEW_LEN).collect();
        Some(format!("{}...", head))
    } else {
        Some(notes.to_string())
    }
}

/// One row of the orders table, ready to render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    pub id: Option<String>,
    pub numero_pedido: String,
    pub fecha_pedido: String,
    pub cliente: String,
    pub estado_pedido: OrderStatus,
    pub fecha_entrega_estimada: String,
    pub total: String,
    /// Inline notes, `None` renders as "Sin notas"
    pub notes: Option<String>,
    /// Full notes for the hover title
    pub notes_title: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        let notes = order.notas_pedido.as_deref();
        Self {
            id: order.id.clone(),
            numero_pedido: order.numero_pedido.clone(),
            fecha_pedido: to_display_format(&order.fecha_pedido),
            cliente: order.cliente.clone(),
            estado_pedido: order.estado_pedido.clone(),
            fecha_entrega_estimada: to_display_format(&order.fecha_entrega_estimada),
            total: format_total(&order.total_pedido),
            notes: notes_preview(notes),
            notes_title: notes
                .filter(|n| !n.is_empty())
                .unwrap_or("Sin notas")
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_total_thousands() {
        assert_eq!(format_total("150000"), "$ 150.000");
        assert_eq!(format_total("1234567"), "$ 1.234.567");
        assert_eq!(format_total("999"), "$ 999");
    }

    #[test]
    fn test_format_total_decimals() {
        assert_eq!(format_total("1234.5"), "$ 1.234,5");
        assert_eq!(format_total("1234.56"), "$ 1.234,56");
        assert_eq!(format_total("10.00"), "$ 10");
    }

    #[test]
    fn test_format_total_negative() {
        assert_eq!(format_total("-2500"), "-$ 2.500");
    }

    #[test]
    fn test_format_total_negative_rounding_to_zero_has_no_sign() {
        assert_eq!(format_total("-0.004"), "$ 0");
        assert_eq!(format_total("-0.5"), "-$ 0,5");
    }

    #[test]
    fn test_format_total_not_a_number() {
        assert_eq!(format_total("gratis"), "gratis");
        assert_eq!(format_total(""), "");
    }

    #[test]
    fn test_notes_preview_short() {
        assert_eq!(notes_preview(Some("urgente")), Some("urgente".to_string()));
    }

    #[test]
    fn test_notes_preview_truncates_long_notes() {
        let notes = "a".repeat(31);
        let preview = notes_preview(Some(&notes)).unwrap();
        assert_eq!(preview, format!("{}...", "a".repeat(30)));

        let exact = "b".repeat(30);
        assert_eq!(notes_preview(Some(&exact)), Some(exact.clone()));
    }

    #[test]
    fn test_notes_preview_empty() {
        assert_eq!(notes_preview(None), None);
        assert_eq!(notes_preview(Some("")), None);
    }

    #[test]
    fn test_order_row_formats_every_column() {
        let order = Order {
            id: Some("9".to_string()),
            numero_pedido: "P-9".to_string(),
            fecha_pedido: "05-03-2024".to_string(),
            cliente: "c-1".to_string(),
            estado_pedido: OrderStatus::Atrasado,
            fecha_entrega_estimada: "2024-03-20".to_string(),
            total_pedido: "250000".to_string(),
            notas_pedido: None,
        };
        let row = OrderRow::from(&order);
        assert_eq!(row.fecha_pedido, "05/03/2024");
        assert_eq!(row.fecha_entrega_estimada, "20/03/2024");
        assert_eq!(row.total, "$ 250.000");
        assert_eq!(row.notes, None);
        assert_eq!(row.notes_title, "Sin notas");
    }
}
