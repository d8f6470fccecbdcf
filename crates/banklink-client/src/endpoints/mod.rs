//! Endpoint payloads and calls
//!
//! - auth: login and registration under `/auth`
//! - accounts: listing and balance mutations under `/accounts`

pub mod accounts;
pub mod auth;

pub use accounts::{AccountAmountRequest, TransferRequest, TransferResponse};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest};
