//! Authentication endpoints

use banklink_core::User;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiOperation, ApiResult};
use crate::transport::{rejection, HttpTransport, RawResponse};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub surname: String,
    pub id_number: String,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("surname", &self.surname)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Envelope used by both auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Auth endpoints can refuse with a 2xx status and `success:false`
fn into_user(operation: ApiOperation, response: RawResponse) -> ApiResult<User> {
    if !response.status.is_success() {
        return Err(rejection(operation, &response));
    }

    let envelope: AuthResponse =
        serde_json::from_slice(&response.body).map_err(|e| ApiError::InvalidResponse {
            operation,
            reason: e.to_string(),
        })?;

    if !envelope.success {
        let message = envelope
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| operation.fallback_message());
        log::warn!("{} refused: {}", operation, message);
        return Err(ApiError::Rejected {
            operation,
            status: response.status.as_u16(),
            message,
        });
    }

    envelope.user.ok_or_else(|| ApiError::InvalidResponse {
        operation,
        reason: "success response without a user".to_string(),
    })
}

pub(crate) async fn login(transport: &HttpTransport, request: &LoginRequest) -> ApiResult<User> {
    let response = transport
        .post_json(ApiOperation::Login, LOGIN_PATH, request)
        .await?;
    into_user(ApiOperation::Login, response)
}

pub(crate) async fn register(
    transport: &HttpTransport,
    request: &RegisterRequest,
) -> ApiResult<User> {
    let response = transport
        .post_json(ApiOperation::Register, REGISTER_PATH, request)
        .await?;
    into_user(ApiOperation::Register, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::body::Bytes;
    use hyper::StatusCode;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body: Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn test_success_false_on_ok_status_is_rejection() {
        let err = into_user(
            ApiOperation::Register,
            raw(200, r#"{"success":false,"message":"Email already registered!"}"#),
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "Email already registered!");
    }

    #[test]
    fn test_success_without_user_is_invalid() {
        let err = into_user(ApiOperation::Login, raw(200, r#"{"success":true}"#)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse { .. }));
    }

    #[test]
    fn test_register_request_wire_names() {
        let request = RegisterRequest {
            name: "Thandi".to_string(),
            surname: "Nkosi".to_string(),
            id_number: "9001015009087".to_string(),
            email: "thandi@example.com".to_string(),
            password: "secret".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["idNumber"], "9001015009087");
        assert!(!format!("{:?}", request).contains("secret"));
    }
}
