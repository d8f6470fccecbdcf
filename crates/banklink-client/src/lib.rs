//! HTTP client for the Bank-Link backend
//!
//! - transport: one JSON exchange per call with a timeout
//! - endpoints: request and response payloads for `/auth` and `/accounts`
//! - error: refusals, transport failures and their user-facing messages

pub mod endpoints;
pub mod error;
pub mod transport;

use async_trait::async_trait;
use banklink_config::Config;
use banklink_core::{Account, User};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::time::Duration;

pub use endpoints::{AccountAmountRequest, LoginRequest, RegisterRequest, TransferRequest, TransferResponse};
pub use error::{ApiError, ApiErrorCode, ApiOperation, ApiResult};
pub use transport::HttpTransport;

/// Operations the backend offers to the client
#[async_trait]
pub trait BankApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User>;

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User>;

    /// All accounts keyed by account id
    async fn fetch_accounts(&self) -> ApiResult<BTreeMap<String, Account>>;

    /// Returns the full updated account
    async fn deposit(&self, account_id: &str, amount: Decimal) -> ApiResult<Account>;

    /// Returns the full updated account
    async fn withdraw(&self, account_id: &str, amount: Decimal) -> ApiResult<Account>;

    /// Returns both updated accounts
    async fn transfer(&self, request: &TransferRequest) -> ApiResult<TransferResponse>;
}

/// `BankApi` backed by the real HTTP service
#[derive(Clone)]
pub struct HttpBankApi {
    transport: HttpTransport,
}

impl HttpBankApi {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        Ok(Self {
            transport: HttpTransport::new(base_url, timeout)?,
        })
    }

    pub fn from_config(config: &Config) -> ApiResult<Self> {
        Self::new(&config.api.base_url, config.request_timeout())
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

#[async_trait]
impl BankApi for HttpBankApi {
    async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        endpoints::auth::login(&self.transport, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        endpoints::auth::register(&self.transport, request).await
    }

    async fn fetch_accounts(&self) -> ApiResult<BTreeMap<String, Account>> {
        endpoints::accounts::fetch_accounts(&self.transport).await
    }

    async fn deposit(&self, account_id: &str, amount: Decimal) -> ApiResult<Account> {
        let request = AccountAmountRequest {
            account_id: account_id.to_string(),
            amount,
        };
        endpoints::accounts::deposit(&self.transport, &request).await
    }

    async fn withdraw(&self, account_id: &str, amount: Decimal) -> ApiResult<Account> {
        let request = AccountAmountRequest {
            account_id: account_id.to_string(),
            amount,
        };
        endpoints::accounts::withdraw(&self.transport, &request).await
    }

    async fn transfer(&self, request: &TransferRequest) -> ApiResult<TransferResponse> {
        endpoints::accounts::transfer(&self.transport, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    fn cheque(balance: f64) -> Value {
        json!({
            "name": "Cheque Account",
            "holder": "Thandi Nkosi",
            "balance": balance,
            "transactions": [
                {"date": "2024-06-01", "type": "Opening Balance", "amount": 1000.0, "balance": 1000.0}
            ]
        })
    }

    async fn login_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        match body["email"].as_str() {
            Some("thandi@example.com") if body["password"] == "secret" => (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "message": "Login successful",
                    "user": {
                        "id": 1,
                        "name": "Thandi",
                        "surname": "Nkosi",
                        "email": "thandi@example.com",
                        "accounts": {"ACC001": {"name": "Cheque Account", "balance": 1000.0}}
                    }
                })),
            ),
            Some("soft@example.com") => (
                StatusCode::OK,
                Json(json!({"success": false, "message": "Account locked"})),
            ),
            _ => (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": "Invalid email or password"})),
            ),
        }
    }

    async fn accounts_handler() -> Json<Value> {
        Json(json!({
            "ACC001": cheque(1000.0),
            "SAV001": {"name": "Savings Account", "balance": 5000.0, "transactions": []}
        }))
    }

    async fn deposit_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["accountId"] == "ACC001" && body["amount"].is_number() {
            let amount = body["amount"].as_f64().unwrap_or_default();
            (StatusCode::OK, Json(cheque(1000.0 + amount)))
        } else {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"message": "bad body"})))
        }
    }

    async fn withdraw_handler() -> (StatusCode, Json<Value>) {
        (StatusCode::BAD_REQUEST, Json(json!({"message": "Insufficient funds"})))
    }

    async fn transfer_handler(Json(body): Json<Value>) -> Json<Value> {
        let amount = body["amount"].as_f64().unwrap_or_default();
        Json(json!({
            "fromAccount": cheque(1000.0 - amount),
            "toAccount": {"name": "Savings Account", "balance": 5000.0 + amount, "transactions": []}
        }))
    }

    async fn spawn_backend() -> String {
        let router = Router::new()
            .route("/api/auth/login", post(login_handler))
            .route("/api/accounts", get(accounts_handler))
            .route("/api/accounts/deposit", post(deposit_handler))
            .route("/api/accounts/withdraw", post(withdraw_handler))
            .route("/api/accounts/transfer", post(transfer_handler))
            .route(
                "/api/auth/register",
                post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
            )
            .route("/api/broken/accounts", get(|| async { "<html>not json</html>" }))
            .route(
                "/api/slow/accounts",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Json(json!({}))
                }),
            );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn client(base: &str) -> HttpBankApi {
        HttpBankApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_carries_profile() {
        let api = client(&spawn_backend().await);
        let user = api
            .login(&LoginRequest {
                email: "thandi@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.display_name(), "Thandi Nkosi");
        assert!(user.accounts.unwrap().contains_key("ACC001"));
    }

    #[tokio::test]
    async fn test_login_refusals() {
        let api = client(&spawn_backend().await);

        let err = api
            .login(&LoginRequest {
                email: "thandi@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
        assert_eq!(err.user_message(), "Invalid email or password");

        let err = api
            .login(&LoginRequest {
                email: "soft@example.com".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 200, .. }));
        assert_eq!(err.user_message(), "Account locked");
    }

    #[tokio::test]
    async fn test_register_server_error_uses_fallback() {
        let api = client(&spawn_backend().await);
        let err = api
            .register(&RegisterRequest {
                name: "Thandi".to_string(),
                surname: "Nkosi".to_string(),
                id_number: "9001015009087".to_string(),
                email: "thandi@example.com".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Rejected { status: 500, .. }));
        assert_eq!(err.user_message(), "Failed to process registration.");
    }

    #[tokio::test]
    async fn test_fetch_accounts() {
        let api = client(&spawn_backend().await);
        let accounts = api.fetch_accounts().await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts["SAV001"].balance, Decimal::new(5000, 0));
        assert_eq!(accounts["ACC001"].transaction_count(), 1);
    }

    #[tokio::test]
    async fn test_deposit_sends_numeric_amount() {
        let api = client(&spawn_backend().await);
        let account = api.deposit("ACC001", Decimal::new(25050, 2)).await.unwrap();
        assert_eq!(account.balance, Decimal::new(125050, 2));
    }

    #[tokio::test]
    async fn test_withdraw_rejection_message() {
        let api = client(&spawn_backend().await);
        let err = api.withdraw("ACC001", Decimal::new(99999, 0)).await.unwrap_err();
        assert!(err.is_rejection());
        assert_eq!(err.user_message(), "Insufficient funds");
    }

    #[tokio::test]
    async fn test_transfer_returns_both_sides() {
        let api = client(&spawn_backend().await);
        let response = api
            .transfer(&TransferRequest {
                from_account_id: "ACC001".to_string(),
                to_account_id: "SAV001".to_string(),
                amount: Decimal::new(100, 0),
            })
            .await
            .unwrap();
        assert_eq!(response.from_account.balance, Decimal::new(900, 0));
        assert_eq!(response.to_account.balance, Decimal::new(5100, 0));
    }

    #[tokio::test]
    async fn test_success_with_unreadable_body() {
        let base = spawn_backend().await;
        let api = client(&format!("{}/broken", base));
        let err = api.fetch_accounts().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
        assert_eq!(err.user_message(), error::CONNECTION_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = client(&format!("http://{}/api", addr));
        let err = api.fetch_accounts().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
        assert_eq!(err.user_message(), "Connection error. Please try again.");
    }

    #[tokio::test]
    async fn test_timeout() {
        let base = spawn_backend().await;
        let api = HttpBankApi::new(&format!("{}/slow", base), Duration::from_millis(100)).unwrap();
        let err = api.fetch_accounts().await.unwrap_err();
        assert_eq!(err.code(), ApiErrorCode::Timeout);
        assert_eq!(err.user_message(), error::TIMEOUT_MESSAGE);
    }

    #[test]
    fn test_from_config() {
        let config = Config::default();
        let api = HttpBankApi::from_config(&config).unwrap();
        assert_eq!(api.transport().base_url(), "http://localhost:8080/api");
        assert_eq!(api.transport().timeout(), Duration::from_secs(30));
    }
}
