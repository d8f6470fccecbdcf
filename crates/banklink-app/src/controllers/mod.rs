//! Form controllers
//!
//! Each controller validates its form, calls the backend, applies the
//! response to the account cache and reports back through the notifier.
//! Errors never leave a controller; they become an outcome and a message.

pub mod accounts;
pub mod auth;
pub mod money;
pub mod session;
pub mod statement;

use banklink_client::BankApi;
use banklink_config::Config;
use banklink_core::SessionStore;
use banklink_utils::CurrencyFormat;
use std::sync::Arc;
use std::time::Duration;

use crate::notify::{Notification, Notifier};
use crate::view::DashboardView;

pub use accounts::{AccountsLoader, LOAD_FAILED_MESSAGE, LOGIN_REQUIRED_MESSAGE};
pub use auth::{LoginController, RegisterController};
pub use money::{AmountController, TransferController};
pub use session::LogoutController;
pub use statement::StatementController;

/// Collaborators shared by every controller
#[derive(Clone)]
pub struct ControllerContext {
    pub api: Arc<dyn BankApi>,
    pub notifier: Arc<dyn Notifier>,
    pub view: Arc<dyn DashboardView>,
    pub session: SessionStore,
    pub currency: CurrencyFormat,
    pub toast_duration: Duration,
}

impl ControllerContext {
    pub fn new(
        api: Arc<dyn BankApi>,
        notifier: Arc<dyn Notifier>,
        view: Arc<dyn DashboardView>,
        session: SessionStore,
    ) -> Self {
        Self {
            api,
            notifier,
            view,
            session,
            currency: CurrencyFormat::default(),
            toast_duration: Duration::from_millis(3000),
        }
    }

    /// Apply the `currency` and `notifications` sections
    pub fn with_config(mut self, config: &Config) -> Self {
        self.currency = CurrencyFormat::new(
            config.currency.symbol.clone(),
            config.currency.decimal_places,
        );
        self.toast_duration = config.toast_duration();
        self
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notifier
            .toast(Notification::success(message, self.toast_duration));
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notifier
            .toast(Notification::error(message, self.toast_duration));
    }
}
