//! JSON-over-HTTP exchange with the backend
//!
//! One request per call, bounded by a timeout, no retries.

use hyper::body::Bytes;
use hyper::client::HttpConnector;
use hyper::header::{ACCEPT, CONTENT_TYPE};
use hyper::{Body, Client, Method, Request, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ApiError, ApiOperation, ApiResult};

/// Status and raw body of a completed exchange
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// Error payload the backend attaches to refusals
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Thin wrapper over a hyper client bound to one base URL
#[derive(Clone)]
pub struct HttpTransport {
    client: Client<HttpConnector>,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let parsed: Uri = base_url.parse().map_err(|_| ApiError::InvalidUrl {
            url: base_url.clone(),
        })?;
        if parsed.scheme_str() != Some("http") || parsed.host().is_none() {
            return Err(ApiError::InvalidUrl { url: base_url });
        }

        Ok(Self {
            client: Client::new(),
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn url(&self, path: &str) -> ApiResult<Uri> {
        let url = format!("{}{}", self.base_url, path);
        url.parse().map_err(|_| ApiError::InvalidUrl { url })
    }

    /// GET `path`
    pub async fn get(&self, operation: ApiOperation, path: &str) -> ApiResult<RawResponse> {
        self.send(operation, Method::GET, path, None).await
    }

    /// POST `body` as JSON to `path`
    pub async fn post_json<B: Serialize>(
        &self,
        operation: ApiOperation,
        path: &str,
        body: &B,
    ) -> ApiResult<RawResponse> {
        let payload = serde_json::to_vec(body).map_err(|e| ApiError::InvalidResponse {
            operation,
            reason: format!("request could not be encoded: {}", e),
        })?;
        self.send(operation, Method::POST, path, Some(payload)).await
    }

    async fn send(
        &self,
        operation: ApiOperation,
        method: Method,
        path: &str,
        payload: Option<Vec<u8>>,
    ) -> ApiResult<RawResponse> {
        let uri = self.url(path)?;
        log::debug!("{} {} ({})", method, uri, operation);

        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(ACCEPT, "application/json");
        let body = match payload {
            Some(bytes) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(bytes)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).map_err(|e| ApiError::Transport {
            operation,
            reason: e.to_string(),
        })?;

        let exchange = async {
            let response = self.client.request(request).await?;
            let status = response.status();
            let body = hyper::body::to_bytes(response.into_body()).await?;
            Ok::<_, hyper::Error>(RawResponse { status, body })
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Ok(Ok(response)) => {
                log::debug!("{} answered {}", operation, response.status);
                Ok(response)
            }
            Ok(Err(e)) => {
                log::error!("{} request failed: {}", operation, e);
                Err(ApiError::Transport {
                    operation,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                log::error!("{} request timed out after {:?}", operation, self.timeout);
                Err(ApiError::Timeout {
                    operation,
                    timeout: self.timeout,
                })
            }
        }
    }
}

/// Turn a non-success status into a refusal carrying the backend's message
pub(crate) fn rejection(operation: ApiOperation, response: &RawResponse) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| operation.fallback_message());

    log::warn!("{} rejected with {}: {}", operation, response.status, message);
    ApiError::Rejected {
        operation,
        status: response.status.as_u16(),
        message,
    }
}

/// Decode a JSON success body, failing on any non-2xx status
pub(crate) fn decode<T: DeserializeOwned>(
    operation: ApiOperation,
    response: RawResponse,
) -> ApiResult<T> {
    if !response.status.is_success() {
        return Err(rejection(operation, &response));
    }
    serde_json::from_slice(&response.body).map_err(|e| {
        log::error!("{} response could not be decoded: {}", operation, e);
        ApiError::InvalidResponse {
            operation,
            reason: e.to_string(),
        }
    })
}
