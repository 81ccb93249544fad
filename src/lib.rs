//! # Pedidos Proxy
//!
//! A thin HTTP proxy in front of the CRM's orders entry point, together with
//! the client-side logic of the orders dashboard.
//!
//! ## Features
//!
//! - **Six Proxy Routes**: list, list pending, list clients, create, update and delete
//!   orders under `/api`, forwarded verbatim to the CRM
//! - **Fixed Error Bodies**: upstream failures become a 500 with a per-route message
//! - **Date Conversion**: browser `YYYY-MM-DD` to CRM `DD-MM-YYYY` and back
//! - **Form Validation**: per-field messages in the order the form shows them
//! - **Dashboard Controller**: list, filter, create, change status and delete, with
//!   an auto-dismissing banner
//! - **Configuration-Based**: YAML file plus environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pedidos::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = ProxyConfig::load(None)?;
//!     ServerBuilder::new().with_config(config).serve().await
//! }
//! ```

pub mod app;
pub mod client;
pub mod config;
pub mod core;
pub mod server;
pub mod upstream;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Client, Endpoint, NewOrder, Order, OrderDraft, OrderField, OrderForm, OrderRow,
        OrderStatus, OrderStatusUpdate, PedidosError, PedidosResult, validate_order,
    };
    pub use crate::core::dates::{backend_to_input_date, to_backend_format, to_display_format};
    pub use crate::core::format::format_total;

    // === Upstream ===
    pub use crate::upstream::{HttpUpstream, InMemoryCrm, Upstream};

    // === Client ===
    pub use crate::client::{ClientError, OrderGateway, ProxyClient};

    // === Dashboard ===
    pub use crate::app::{Banner, BannerKind, Dashboard, SubmitOutcome};

    // === Config ===
    pub use crate::config::ProxyConfig;

    // === Server ===
    pub use crate::server::{ProxyState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
}
