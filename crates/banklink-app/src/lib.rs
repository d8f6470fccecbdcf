//! Bank-Link client application layer
//!
//! - forms: form fields, phases and submission outcomes
//! - controllers: login, registration, money movements, statements
//! - notify / view: where messages and balances are shown
//! - app: the cache owner tying it together

pub mod app;
pub mod controllers;
pub mod forms;
pub mod notify;
pub mod view;

#[cfg(test)]
pub(crate) mod testing;

pub use app::BankApp;
pub use controllers::ControllerContext;
pub use forms::{AmountForm, FormKind, FormPhase, LoginForm, RegisterForm, SubmitOutcome, TransferForm};
pub use notify::{ConsoleNotifier, Notification, NotificationKind, Notifier};
pub use view::{ConsoleDashboard, DashboardView};
