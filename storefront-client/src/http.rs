//! HTTP transport shared by the gateways
//!
//! Every call is bounded by a per-request timeout (reads and writes differ)
//! and decodes the common [`ApiResponse`] envelope. There is no automatic
//! retry.

use crate::token::TokenStore;
use crate::{ApiResponse, ClientConfig, ClientError, ClientResult};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// HTTP client for the storefront services
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    read_timeout: Duration,
    write_timeout: Duration,
    tokens: Arc<dyn TokenStore>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ClientError::Connect(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            read_timeout: config.read_timeout,
            write_timeout: config.write_timeout,
            tokens,
        })
    }

    /// Token store backing the bearer header
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Current session token
    pub fn token(&self) -> Option<String> {
        self.tokens.get()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {}", t))
    }

    /// GET with the bearer header when a token is stored
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> ClientResult<ApiResponse<T>> {
        let request = self.client.get(url);
        self.send(request, self.read_timeout, true).await
    }

    /// GET without credentials
    pub async fn get_public<T: DeserializeOwned>(&self, url: &str) -> ClientResult<ApiResponse<T>> {
        let request = self.client.get(url);
        self.send(request, self.read_timeout, false).await
    }

    /// POST a JSON body with the bearer header when a token is stored
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, url: &str, body: &B) -> ClientResult<ApiResponse<T>> {
        let request = self.client.post(url).json(body);
        self.send(request, self.write_timeout, true).await
    }

    /// POST a JSON body without credentials
    pub async fn post_public<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        let request = self.client.post(url).json(body);
        self.send(request, self.write_timeout, false).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        mut request: RequestBuilder,
        timeout: Duration,
        authenticated: bool,
    ) -> ClientResult<ApiResponse<T>> {
        if authenticated && let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.timeout(timeout).send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<ApiResponse<T>> {
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(ApiResponse {
                ok: true,
                status_code: status.as_u16(),
                message: String::new(),
                data: None,
                count: 0,
                error_code: None,
            });
        }

        let text = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_error(status, &text));
        }

        let envelope: ApiResponse<T> =
            serde_json::from_str(&text).map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if !envelope.ok {
            let status_code = if envelope.status_code == 0 {
                status.as_u16()
            } else {
                envelope.status_code
            };
            return Err(ClientError::Api {
                status: status_code,
                message: envelope.message,
                error_code: envelope.error_code,
            });
        }

        Ok(envelope)
    }

    /// Failure envelope of a non-success response, raw body otherwise
    fn api_error(status: StatusCode, body: &str) -> ClientError {
        match serde_json::from_str::<ApiResponse<serde_json::Value>>(body) {
            Ok(envelope) => ClientError::Api {
                status: status.as_u16(),
                message: if envelope.message.is_empty() {
                    status.canonical_reason().unwrap_or_default().to_string()
                } else {
                    envelope.message
                },
                error_code: envelope.error_code,
            },
            Err(_) => ClientError::Api {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or_default().to_string()
                } else {
                    body.to_string()
                },
                error_code: None,
            },
        }
    }
}
