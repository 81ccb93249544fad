//! Typed error handling for the pedidos proxy
//!
//! # Error Categories
//!
//! - [`UpstreamError`]: the CRM call behind a proxy endpoint failed
//! - [`ValidationError`]: an order draft broke one or more field rules
//! - [`ConfigError`]: configuration could not be read or is invalid
//! - [`RequestError`]: the incoming HTTP request could not be understood
//!
//! Every error renders over HTTP as `{"error": "<message>"}`. Upstream
//! failures always render as `500` with a fixed message per endpoint; the
//! underlying cause is logged, never returned.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::core::validation::FieldErrors;

/// The main error type of the crate
#[derive(Debug)]
pub enum PedidosError {
    /// Upstream CRM failures
    Upstream(UpstreamError),

    /// Configuration errors
    Config(ConfigError),

    /// HTTP/Request errors
    Request(RequestError),
}

impl fmt::Display for PedidosError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PedidosError::Upstream(e) => write!(f, "{}", e),
            PedidosError::Config(e) => write!(f, "{}", e),
            PedidosError::Request(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for PedidosError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PedidosError::Upstream(e) => Some(e),
            PedidosError::Config(e) => Some(e),
            PedidosError::Request(e) => Some(e),
        }
    }
}

/// Error body returned by every endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl PedidosError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PedidosError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PedidosError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            PedidosError::Request(e) => e.status_code(),
        }
    }

    /// Get the error code for this error, for logs
    pub fn error_code(&self) -> &'static str {
        match self {
            PedidosError::Upstream(_) => "UPSTREAM_ERROR",
            PedidosError::Config(_) => "CONFIG_ERROR",
            PedidosError::Request(e) => e.error_code(),
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

impl IntoResponse for PedidosError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(code = self.error_code(), %status, "request failed");
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Upstream Errors
// =============================================================================

/// Proxy endpoints, one per forwarded CRM operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    ListOrders,
    ListPendingOrders,
    ListClients,
    CreateOrder,
    UpdateOrder,
    DeleteOrder,
}

impl Endpoint {
    pub const ALL: [Endpoint; 6] = [
        Endpoint::ListOrders,
        Endpoint::ListPendingOrders,
        Endpoint::ListClients,
        Endpoint::CreateOrder,
        Endpoint::UpdateOrder,
        Endpoint::DeleteOrder,
    ];

    /// Fixed message returned to callers when this endpoint's upstream call fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::ListOrders => "Error al obtener pedidos",
            Endpoint::ListPendingOrders => "Error al obtener pedidos pendientes",
            Endpoint::ListClients => "Error al obtener clientes",
            Endpoint::CreateOrder => "Error al crear el pedido",
            Endpoint::UpdateOrder => "Error al actualizar el pedido",
            Endpoint::DeleteOrder => "Error al eliminar el pedido",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::ListOrders => "list_orders",
            Endpoint::ListPendingOrders => "list_pending_orders",
            Endpoint::ListClients => "list_clients",
            Endpoint::CreateOrder => "create_order",
            Endpoint::UpdateOrder => "update_order",
            Endpoint::DeleteOrder => "delete_order",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An upstream CRM call failed
///
/// Only the endpoint is kept; the cause is logged where it happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub endpoint: Endpoint,
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint.failure_message())
    }
}

impl std::error::Error for UpstreamError {}

impl From<UpstreamError> for PedidosError {
    fn from(err: UpstreamError) -> Self {
        PedidosError::Upstream(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// An order draft broke one or more field rules
///
/// Carries every violated rule, keyed by field name in form order.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError(pub FieldErrors);

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "Validation failed: {}", messages.join(", "))
    }
}

impl std::error::Error for ValidationError {}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration file not found
    FileNotFound { path: String },

    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Configuration values rejected by validation
    Invalid { message: String },

    /// IO error while reading config
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound { path } => {
                write!(f, "Configuration file not found: {}", path)
            }
            ConfigError::ParseError { file, message } => match file {
                Some(file) => write!(f, "Failed to parse configuration '{}': {}", file, message),
                None => write!(f, "Failed to parse configuration: {}", message),
            },
            ConfigError::Invalid { message } => {
                write!(f, "Invalid configuration: {}", message)
            }
            ConfigError::IoError { message } => {
                write!(f, "Configuration IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for PedidosError {
    fn from(err: ConfigError) -> Self {
        PedidosError::Config(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid request body
    InvalidBody { message: String },

    /// Route does not exist
    NotFound { path: String },

    /// Route exists but not for this method
    MethodNotAllowed { method: String, path: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            RequestError::NotFound { path } => {
                write!(f, "Route not found: {}", path)
            }
            RequestError::MethodNotAllowed { method, path } => {
                write!(f, "Method {} not allowed on {}", method, path)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RequestError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::NotFound { .. } => "NOT_FOUND",
            RequestError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        }
    }
}

impl From<RequestError> for PedidosError {
    fn from(err: RequestError) -> Self {
        PedidosError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<std::io::Error> for PedidosError {
    fn from(err: std::io::Error) -> Self {
        PedidosError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

impl From<serde_yaml::Error> for PedidosError {
    fn from(err: serde_yaml::Error) -> Self {
        PedidosError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for pedidos operations
pub type PedidosResult<T> = Result<T, PedidosError>;

// =============================================================================
// Tests
// =============================================================================
