//! Order submission pipeline
//!
//! Each attempt walks `FormEntry -> ValidatingStock -> Submitting` and ends in
//! `Success` or `Failed`; a failed attempt returns to `FormEntry` with its
//! message kept in [`CheckoutPipeline::form_error`].
//!
//! Stock is checked twice: optimistically against the local snapshot before
//! any network call, then authoritatively by the order service.

pub mod classify;
pub mod form;
pub mod redirect;
pub mod stock;

pub use classify::{Classified, FailureKind, classify};
pub use form::CheckoutForm;
pub use redirect::{LoginRedirect, Navigator};
pub use stock::{StockIssue, check_stock};

use crate::state::StoreHandle;
use async_trait::async_trait;
use shared::ErrorCode;
use shared::models::{BackendOrder, CreateOrderRequest, Order};
use shared::util::{now_millis, now_rfc3339, provisional_order_id};
use std::sync::Arc;
use std::time::Duration;
use storefront_client::{ClientResult, OrderGateway};
use thiserror::Error;

pub const STOCK_PROBLEM_TOAST: &str = "Hay problemas con el stock de algunos productos";
pub const ORDER_SUCCESS_TOAST: &str = "¡Pedido realizado con éxito!";

/// Pipeline state of the current attempt
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutState {
    FormEntry,
    ValidatingStock,
    Submitting,
    Success(Box<Order>),
    Failed,
}

impl CheckoutState {
    fn name(&self) -> &'static str {
        match self {
            CheckoutState::FormEntry => "form_entry",
            CheckoutState::ValidatingStock => "validating_stock",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Success(_) => "success",
            CheckoutState::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Faltan campos obligatorios. Por favor, revísalos.")]
    InvalidForm { missing: Vec<&'static str> },

    #[error("No tienes productos en el carrito.")]
    EmptyCart,

    #[error(
        "Error de stock: {}. Por favor, ajusta las cantidades en tu carrito o elimina los productos agotados.",
        join_issues(.issues)
    )]
    StockCheck { issues: Vec<StockIssue> },

    #[error("{message}")]
    Remote {
        kind: FailureKind,
        code: ErrorCode,
        message: String,
    },
}

impl CheckoutError {
    /// Shared error code for logging and callers that branch on codes
    pub fn code(&self) -> ErrorCode {
        match self {
            CheckoutError::InvalidForm { .. } => ErrorCode::RequiredField,
            CheckoutError::EmptyCart => ErrorCode::OrderEmpty,
            CheckoutError::StockCheck { issues } if issues.iter().any(StockIssue::is_removable) => {
                ErrorCode::ProductOutOfStock
            }
            CheckoutError::StockCheck { .. } => ErrorCode::ProductInsufficientStock,
            CheckoutError::Remote { code, .. } => *code,
        }
    }
}

fn join_issues(issues: &[StockIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join(". ")
}

/// Order service seam
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit(&self, request: &CreateOrderRequest) -> ClientResult<BackendOrder>;
}

#[async_trait]
impl OrderSubmitter for OrderGateway {
    async fn submit(&self, request: &CreateOrderRequest) -> ClientResult<BackendOrder> {
        self.create_order(request).await
    }
}

/// Drives checkout attempts against the shared store
pub struct CheckoutPipeline {
    store: StoreHandle,
    submitter: Arc<dyn OrderSubmitter>,
    navigator: Arc<dyn Navigator>,
    seller_id: i64,
    redirect_delay: Duration,
    state: CheckoutState,
    form_error: Option<String>,
    redirect: Option<LoginRedirect>,
}

impl CheckoutPipeline {
    pub fn new(
        store: StoreHandle,
        submitter: Arc<dyn OrderSubmitter>,
        navigator: Arc<dyn Navigator>,
        seller_id: i64,
        redirect_delay: Duration,
    ) -> Self {
        Self {
            store,
            submitter,
            navigator,
            seller_id,
            redirect_delay,
            state: CheckoutState::FormEntry,
            form_error: None,
            redirect: None,
        }
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Message of the last failed attempt
    pub fn form_error(&self) -> Option<&str> {
        self.form_error.as_deref()
    }

    /// Whether a login redirect is scheduled and not cancelled
    pub fn redirect_pending(&self) -> bool {
        self.redirect.as_ref().is_some_and(|r| !r.is_cancelled())
    }

    /// Run one checkout attempt
    pub async fn submit(&mut self, form: &CheckoutForm) -> Result<Order, CheckoutError> {
        self.transition(CheckoutState::FormEntry);
        self.form_error = None;

        let missing = form.missing_fields();
        if !missing.is_empty() {
            return Err(self.fail(CheckoutError::InvalidForm { missing }));
        }

        let (items, catalog, user_id) = {
            let state = self.store.read().await;
            (
                state.cart.items().to_vec(),
                state.cart.catalog().clone(),
                state.session.as_ref().and_then(|s| s.user.id.as_i64()),
            )
        };
        if items.is_empty() {
            return Err(self.fail(CheckoutError::EmptyCart));
        }

        self.transition(CheckoutState::ValidatingStock);
        let issues = check_stock(&items, &catalog);
        if !issues.is_empty() {
            tracing::warn!(issues = issues.len(), "Stock check failed before submission");
            self.store.notifier().error(STOCK_PROBLEM_TOAST);
            let removed = self.store.remove_out_of_stock().await;
            tracing::debug!(removed, "Pruned unavailable cart lines");
            return Err(self.fail(CheckoutError::StockCheck { issues }));
        }

        self.transition(CheckoutState::Submitting);
        let order = Order::from_cart(
            provisional_order_id(now_millis()),
            now_rfc3339(),
            &items,
            form.customer(),
            form.shipping(),
        );
        let request = CreateOrderRequest::from_order(&order, user_id, self.seller_id);

        match self.submitter.submit(&request).await {
            Ok(backend) => {
                let order = order.confirmed_by(&backend);
                tracing::info!(order_id = %order.id, total = %order.total, "Checkout completed");

                self.store.clear_cart().await;
                self.store.reload_products().await;
                self.store.notifier().success(ORDER_SUCCESS_TOAST);

                self.transition(CheckoutState::Success(Box::new(order.clone())));
                Ok(order)
            }
            Err(e) => {
                let Classified { kind, code, message } = classify(&e);
                tracing::warn!(error = %e, ?kind, code = code.code(), "Order submission failed");
                self.store.notifier().error(message.clone());

                if kind.refreshes_catalog() {
                    // Reloading also prunes lines that ran out
                    self.store.reload_products().await;
                }
                if kind.redirects_to_login() {
                    self.schedule_login_redirect();
                }
                Err(self.fail(CheckoutError::Remote { kind, code, message }))
            }
        }
    }

    /// Cancel pending effects; call when the checkout view goes away
    pub fn teardown(&mut self) {
        if let Some(redirect) = self.redirect.take() {
            redirect.cancel();
        }
    }

    fn schedule_login_redirect(&mut self) {
        // Replacing drops and cancels the previous one
        self.redirect = Some(LoginRedirect::schedule(self.navigator.clone(), self.redirect_delay));
    }

    fn fail(&mut self, err: CheckoutError) -> CheckoutError {
        if matches!(self.state, CheckoutState::ValidatingStock | CheckoutState::Submitting) {
            self.transition(CheckoutState::Failed);
        }
        tracing::debug!(code = err.code().code(), "Checkout attempt failed");
        self.form_error = Some(err.to_string());
        self.transition(CheckoutState::FormEntry);
        err
    }

    fn transition(&mut self, next: CheckoutState) {
        if self.state.name() != next.name() {
            tracing::debug!(from = self.state.name(), to = next.name(), "Checkout state");
        }
        self.state = next;
    }
}

impl Drop for CheckoutPipeline {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_check_message_aggregates_issues() {
        let err = CheckoutError::StockCheck {
            issues: vec![
                StockIssue::OutOfStock { name: "GPU".into() },
                StockIssue::Insufficient {
                    name: "RAM".into(),
                    available: 2,
                    requested: 5,
                },
            ],
        };
        assert_eq!(err.code(), ErrorCode::ProductOutOfStock);
        assert_eq!(
            err.to_string(),
            "Error de stock: GPU está agotado. RAM: solo hay 2 unidades disponibles (solicitaste 5). \
             Por favor, ajusta las cantidades en tu carrito o elimina los productos agotados."
        );
    }

    #[test]
    fn test_remote_error_shows_classified_message() {
        let err = CheckoutError::Remote {
            kind: FailureKind::Generic,
            code: ErrorCode::OrderRejected,
            message: classify::GENERIC_MESSAGE.to_string(),
        };
        assert_eq!(err.to_string(), classify::GENERIC_MESSAGE);
        assert_eq!(err.code(), ErrorCode::OrderRejected);
    }

    #[test]
    fn test_local_failure_codes() {
        assert_eq!(CheckoutError::EmptyCart.code(), ErrorCode::OrderEmpty);
        assert_eq!(
            CheckoutError::InvalidForm { missing: vec!["street"] }.code(),
            ErrorCode::RequiredField
        );
        let err = CheckoutError::StockCheck {
            issues: vec![StockIssue::Insufficient {
                name: "RAM".into(),
                available: 1,
                requested: 2,
            }],
        };
        assert_eq!(err.code(), ErrorCode::ProductInsufficientStock);
    }
}
