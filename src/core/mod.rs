//! Core module containing the order model and the pure logic around it

pub mod dates;
pub mod error;
pub mod form;
pub mod format;
pub mod order;
pub mod validation;

pub use error::{Endpoint, PedidosError, PedidosResult, UpstreamError};
pub use form::{OrderDraft, OrderField, OrderForm};
pub use format::OrderRow;
pub use order::{Client, NewOrder, Order, OrderStatus, OrderStatusUpdate};
pub use validation::{FieldErrors, validate_order};
