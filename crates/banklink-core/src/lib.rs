//! Core account state and business rules for the Bank-Link client
//!
//! - models: accounts, transactions and users as the backend reports them
//! - cache: the in-memory account state mirrored from the backend
//! - validation: checks run before a request leaves the client
//! - session: logged-in flag and cached profile persistence

pub mod cache;
pub mod error;
pub mod models;
pub mod session;
pub mod types;
pub mod validation;

pub use cache::AccountCache;
pub use error::{CoreError, CoreResult, ErrorSeverity};
pub use models::{Account, AccountSummary, Transaction, User};
pub use session::{FileStore, LocalStore, MemoryStore, SessionStore};
pub use types::{MoneyOperation, TransactionKind};
pub use validation::ValidationError;
