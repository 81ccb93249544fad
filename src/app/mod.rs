//! Dashboard controller: the order list, the creation form and the banner
//!
//! Every operation issues at most one gateway call, awaits it, and then
//! refreshes the whole list from the source of truth. Nothing is merged
//! locally and nothing is cached across refreshes.

pub mod banner;

pub use banner::{BANNER_TTL, Banner, BannerKind};

use crate::client::OrderGateway;
use crate::core::form::OrderForm;
use crate::core::format::OrderRow;
use crate::core::order::{Client, Order, OrderStatus, OrderStatusUpdate};
use std::time::Instant;

pub const MSG_CREATED: &str = "Pedido creado exitosamente";
pub const MSG_UPDATED: &str = "Pedido actualizado exitosamente";
pub const MSG_DELETED: &str = "Pedido eliminado exitosamente";
pub const MSG_LOAD_FAILED: &str = "Error al cargar los pedidos";
pub const MSG_LOAD_PENDING_FAILED: &str = "Error al cargar los pedidos pendientes";
pub const MSG_LOAD_CLIENTS_FAILED: &str = "Error al cargar los clientes";
pub const MSG_CREATE_FAILED: &str = "Error al crear el pedido. Por favor, inténtalo de nuevo.";
pub const MSG_UPDATE_FAILED: &str = "Error al actualizar el pedido";
pub const MSG_DELETE_FAILED: &str = "Error al eliminar el pedido";

/// Result of submitting the creation form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; no call was made
    Invalid,
    Created(Order),
    Failed,
}

pub struct Dashboard<G: OrderGateway> {
    gateway: G,
    orders: Vec<Order>,
    clients: Vec<Client>,
    pending_only: bool,
    loading: bool,
    updating_id: Option<String>,
    deleting_id: Option<String>,
    banner: Option<Banner>,
    pub form: OrderForm,
}

impl<G: OrderGateway> Dashboard<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            orders: Vec::new(),
            clients: Vec::new(),
            pending_only: false,
            loading: false,
            updating_id: None,
            deleting_id: None,
            banner: None,
            form: OrderForm::new(),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn pending_only(&self) -> bool {
        self.pending_only
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Id of the order whose status change is in flight
    pub fn updating_id(&self) -> Option<&str> {
        self.updating_id.as_deref()
    }

    /// Id of the order whose deletion is in flight
    pub fn deleting_id(&self) -> Option<&str> {
        self.deleting_id.as_deref()
    }

    /// Table rows for the current list
    pub fn rows(&self) -> Vec<OrderRow> {
        self.orders.iter().map(OrderRow::from).collect()
    }

    /// The banner, if one is showing at `now`
    pub fn banner(&self, now: Instant) -> Option<&Banner> {
        self.banner.as_ref().filter(|b| !b.is_expired(now))
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    fn notify(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    /// Fill the client selector
    pub async fn load_clients(&mut self) {
        match self.gateway.list_clients().await {
            Ok(clients) => self.clients = clients,
            Err(_) => self.form.error = Some(MSG_LOAD_CLIENTS_FAILED.to_string()),
        }
    }

    /// Reload the list according to the pending filter
    ///
    /// On failure the previous list stays in place.
    pub async fn refresh(&mut self) {
        self.loading = true;
        let result = if self.pending_only {
            self.gateway.list_pending().await
        } else {
            self.gateway.list().await
        };
        self.loading = false;

        match result {
            Ok(orders) => self.orders = orders,
            Err(_) => {
                let text = if self.pending_only {
                    MSG_LOAD_PENDING_FAILED
                } else {
                    MSG_LOAD_FAILED
                };
                self.notify(Banner::error(text, Instant::now()));
            }
        }
    }

    pub async fn set_pending_only(&mut self, pending_only: bool) {
        self.pending_only = pending_only;
        self.refresh().await;
    }

    /// Validate and create the order in the form
    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let Some(payload) = self.form.payload() else {
            return SubmitOutcome::Invalid;
        };

        self.form.submitting = true;
        self.form.error = None;
        let result = self.gateway.create(&payload).await;
        self.form.submitting = false;

        match result {
            Ok(created) => {
                self.form.reset();
                self.notify(Banner::success(MSG_CREATED, Instant::now()));
                self.refresh().await;
                SubmitOutcome::Created(created)
            }
            Err(_) => {
                self.form.error = Some(MSG_CREATE_FAILED.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    /// Move `order` to `status`, carrying its notes over
    ///
    /// Returns `false` without calling out when the order has no id or already
    /// has that status.
    pub async fn change_status(&mut self, order: &Order, status: OrderStatus) -> bool {
        let Some(update) = OrderStatusUpdate::for_order(order, status) else {
            return false;
        };

        self.updating_id = Some(update.id.clone());
        let result = self.gateway.update(&update).await;
        self.updating_id = None;

        let banner = match result {
            Ok(_) => Banner::success(MSG_UPDATED, Instant::now()),
            Err(_) => Banner::error(MSG_UPDATE_FAILED, Instant::now()),
        };
        self.notify(banner);
        self.refresh().await;
        true
    }

    /// Delete the order once the user has confirmed
    pub async fn delete(&mut self, id: &str, confirmed: bool) -> bool {
        if !confirmed {
            return false;
        }

        self.deleting_id = Some(id.to_string());
        let result = self.gateway.delete(id).await;
        self.deleting_id = None;

        let banner = match result {
            Ok(_) => Banner::success(MSG_DELETED, Instant::now()),
            Err(_) => Banner::error(MSG_DELETE_FAILED, Instant::now()),
        };
        self.notify(banner);
        self.refresh().await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, ClientResult};
    use crate::core::form::OrderField;
    use crate::core::order::NewOrder;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    /// Gateway keeping orders in a Vec, with a switch to fail every call
    #[derive(Default)]
    struct FakeGateway {
        orders: Mutex<Vec<Order>>,
        fail: AtomicBool,
        calls: AtomicUsize,
    }

    impl FakeGateway {
        fn check(&self) -> ClientResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(ClientError::Status {
                    url: "fake".to_string(),
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "fallo".to_string(),
                })
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl OrderGateway for FakeGateway {
        async fn list(&self) -> ClientResult<Vec<Order>> {
            self.check()?;
            Ok(self.orders.lock().unwrap().clone())
        }

        async fn list_pending(&self) -> ClientResult<Vec<Order>> {
            self.check()?;
            Ok(self
                .orders
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.estado_pedido == OrderStatus::Pendiente)
                .cloned()
                .collect())
        }

        async fn list_clients(&self) -> ClientResult<Vec<Client>> {
            self.check()?;
            Ok(vec![Client {
                id: "c-1".to_string(),
                first_name: "Ana".to_string(),
                last_name: "Gómez".to_string(),
            }])
        }

        async fn create(&self, order: &NewOrder) -> ClientResult<Order> {
            self.check()?;
            let mut orders = self.orders.lock().unwrap();
            let created = Order {
                id: Some(format!("{}", orders.len() + 1)),
                numero_pedido: order.numero_pedido.clone(),
                fecha_pedido: order.fecha_pedido.clone(),
                cliente: order.cliente.clone(),
                estado_pedido: order.estado_pedido.clone(),
                fecha_entrega_estimada: order.fecha_entrega_estimada.clone(),
                total_pedido: order.total_pedido.clone(),
                notas_pedido: Some(order.notas_pedido.clone()),
            };
            orders.push(created.clone());
            Ok(created)
        }

        async fn update(&self, update: &OrderStatusUpdate) -> ClientResult<Order> {
            self.check()?;
            let mut orders = self.orders.lock().unwrap();
            let order = orders
                .iter_mut()
                .find(|o| o.id.as_deref() == Some(update.id.as_str()))
                .unwrap();
            order.estado_pedido = update.estado_pedido.clone();
            order.notas_pedido = Some(update.notas_pedido.clone());
            Ok(order.clone())
        }

        async fn delete(&self, id: &str) -> ClientResult<Value> {
            self.check()?;
            self.orders
                .lock()
                .unwrap()
                .retain(|o| o.id.as_deref() != Some(id));
            Ok(json!({ "success": true }))
        }
    }

    fn fill_form<G: OrderGateway>(dashboard: &mut Dashboard<G>, numero: &str) {
        let form = &mut dashboard.form;
        form.set_field(OrderField::NumeroPedido, numero);
        form.set_field(OrderField::FechaPedido, "2024-03-05");
        form.set_field(OrderField::Cliente, "c-1");
        form.set_field(OrderField::FechaEntregaEstimada, "2024-03-12");
        form.set_field(OrderField::TotalPedido, "120000");
    }

    #[tokio::test]
    async fn test_submit_invalid_form_makes_no_call() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        assert_eq!(dashboard.submit_form().await, SubmitOutcome::Invalid);
        assert_eq!(dashboard.gateway().calls(), 0);
        assert!(!dashboard.form.errors.is_empty());
    }

    #[tokio::test]
    async fn test_submit_creates_resets_and_refreshes() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");

        let outcome = dashboard.submit_form().await;
        let SubmitOutcome::Created(created) = outcome else {
            panic!("expected creation, got {:?}", outcome);
        };
        assert_eq!(created.fecha_pedido, "05-03-2024");
        assert_eq!(created.fecha_entrega_estimada, "2024-03-12");

        assert_eq!(dashboard.orders().len(), 1);
        assert!(dashboard.form.draft.numero_pedido.is_empty());
        let banner = dashboard.banner(Instant::now()).unwrap();
        assert_eq!(banner.text, MSG_CREATED);
        assert_eq!(banner.kind, BannerKind::Success);
    }

    #[tokio::test]
    async fn test_submit_failure_keeps_draft() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");
        dashboard.gateway().fail.store(true, Ordering::SeqCst);

        assert_eq!(dashboard.submit_form().await, SubmitOutcome::Failed);
        assert_eq!(dashboard.form.error.as_deref(), Some(MSG_CREATE_FAILED));
        assert_eq!(dashboard.form.draft.numero_pedido, "P-1");
        assert!(!dashboard.form.submitting);
    }

    #[tokio::test]
    async fn test_change_status_updates_and_refreshes() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");
        dashboard.submit_form().await;

        let order = dashboard.orders()[0].clone();
        assert!(dashboard.change_status(&order, OrderStatus::Pagado).await);
        assert_eq!(dashboard.orders()[0].estado_pedido, OrderStatus::Pagado);
        assert_eq!(dashboard.banner(Instant::now()).unwrap().text, MSG_UPDATED);
        assert!(dashboard.updating_id().is_none());
    }

    #[tokio::test]
    async fn test_change_status_noop_cases() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        let unsaved = Order::default();
        assert!(!dashboard.change_status(&unsaved, OrderStatus::Pagado).await);

        let same = Order {
            id: Some("1".to_string()),
            ..Default::default()
        };
        assert!(!dashboard.change_status(&same, OrderStatus::Pendiente).await);
        assert_eq!(dashboard.gateway().calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");
        dashboard.submit_form().await;
        let id = dashboard.orders()[0].id.clone().unwrap();

        assert!(!dashboard.delete(&id, false).await);
        assert_eq!(dashboard.orders().len(), 1);

        assert!(dashboard.delete(&id, true).await);
        assert!(dashboard.orders().is_empty());
        assert_eq!(dashboard.banner(Instant::now()).unwrap().text, MSG_DELETED);
    }

    #[tokio::test]
    async fn test_failed_delete_shows_error_banner() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        dashboard.gateway().fail.store(true, Ordering::SeqCst);
        dashboard.delete("1", true).await;
        // the follow-up refresh fails too and its message replaces the delete error
        let banner = dashboard.banner(Instant::now()).unwrap();
        assert_eq!(banner.kind, BannerKind::Error);
        assert_eq!(banner.text, MSG_LOAD_FAILED);
    }

    #[tokio::test]
    async fn test_pending_filter() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");
        dashboard.submit_form().await;
        fill_form(&mut dashboard, "P-2");
        dashboard.submit_form().await;

        let paid = dashboard.orders()[0].clone();
        dashboard.change_status(&paid, OrderStatus::Pagado).await;

        dashboard.set_pending_only(true).await;
        assert!(dashboard.pending_only());
        assert_eq!(dashboard.orders().len(), 1);
        assert_eq!(dashboard.orders()[0].numero_pedido, "P-2");
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_list() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");
        dashboard.submit_form().await;

        dashboard.gateway().fail.store(true, Ordering::SeqCst);
        dashboard.set_pending_only(true).await;
        assert_eq!(dashboard.orders().len(), 1);
        assert_eq!(
            dashboard.banner(Instant::now()).unwrap().text,
            MSG_LOAD_PENDING_FAILED
        );
        assert!(!dashboard.is_loading());
    }

    #[tokio::test]
    async fn test_load_clients() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        dashboard.load_clients().await;
        assert_eq!(dashboard.clients().len(), 1);

        let mut failing = Dashboard::new(FakeGateway::default());
        failing.gateway().fail.store(true, Ordering::SeqCst);
        failing.load_clients().await;
        assert_eq!(failing.form.error.as_deref(), Some(MSG_LOAD_CLIENTS_FAILED));
    }

    #[tokio::test]
    async fn test_banner_auto_dismisses() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");
        dashboard.submit_form().await;

        let later = Instant::now() + BANNER_TTL + Duration::from_millis(1);
        assert!(dashboard.banner(later).is_none());

        dashboard.dismiss_banner();
        assert!(dashboard.banner(Instant::now()).is_none());
    }

    #[tokio::test]
    async fn test_rows_are_display_formatted() {
        let mut dashboard = Dashboard::new(FakeGateway::default());
        fill_form(&mut dashboard, "P-1");
        dashboard.submit_form().await;

        let rows = dashboard.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].fecha_pedido, "05/03/2024");
        assert_eq!(rows[0].total, "$ 120.000");
        assert_eq!(rows[0].notes, None);
    }
}
