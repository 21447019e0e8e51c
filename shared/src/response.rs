//! API response envelope
//!
//! Every microservice (auth, products, orders, reviews) wraps its payload in
//! the same envelope:
//!
//! ```json
//! {
//!     "ok": true,
//!     "statusCode": 200,
//!     "message": "Productos obtenidos",
//!     "data": [ ... ],
//!     "count": 11
//! }
//! ```
//!
//! Services that support structured classification also send `errorCode`
//! (`OUT_OF_STOCK`, `INSUFFICIENT_STOCK`, `VALIDATION_ERROR`, `AUTH_ERROR`)
//! on failures.

use serde::{Deserialize, Serialize};

/// Response envelope shared by all remote services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    #[serde(default)]
    pub ok: bool,
    /// HTTP-like status code echoed by the service
    #[serde(default)]
    pub status_code: u16,
    /// Human-readable message (Spanish on the current backends)
    #[serde(default)]
    pub message: String,
    /// Payload, absent on failures
    pub data: Option<T>,
    /// Number of records in `data`
    #[serde(default)]
    pub count: u64,
    /// Structured failure classification, when the service provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            ok: true,
            status_code: 200,
            message: "OK".to_string(),
            data: Some(data),
            count: 1,
            error_code: None,
        }
    }

    /// Create a successful response with an explicit record count
    pub fn success_with_count(data: T, count: u64) -> Self {
        Self {
            count,
            ..Self::success(data)
        }
    }

    /// Create a failure response
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            status_code,
            message: message.into(),
            data: None,
            count: 0,
            error_code: None,
        }
    }

    /// Attach a structured error code
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Payload of a successful response, `None` otherwise
    pub fn into_data(self) -> Option<T> {
        if self.ok { self.data } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_envelope() {
        let json = r#"{"ok":true,"statusCode":200,"message":"OK","data":[1,2,3],"count":3}"#;
        let resp: ApiResponse<Vec<u32>> = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(resp.count, 3);
        assert_eq!(resp.into_data(), Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_deserialize_failure_with_null_data() {
        let json = r#"{"ok":false,"statusCode":400,"message":"Producto agotado","data":null,"count":0,"errorCode":"OUT_OF_STOCK"}"#;
        let resp: ApiResponse<u32> = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.status_code, 400);
        assert_eq!(resp.error_code.as_deref(), Some("OUT_OF_STOCK"));
        assert_eq!(resp.into_data(), None);
    }

    #[test]
    fn test_missing_fields_default() {
        let resp: ApiResponse<u32> = serde_json::from_str(r#"{"message":"boom"}"#).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.status_code, 0);
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_serialize_skips_absent_error_code() {
        let json = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(json["statusCode"], 200);
        assert!(json.get("errorCode").is_none());

        let json = serde_json::to_value(ApiResponse::<u32>::failure(401, "Token inválido").with_error_code("AUTH_ERROR")).unwrap();
        assert_eq!(json["errorCode"], "AUTH_ERROR");
        assert_eq!(json["data"], serde_json::Value::Null);
    }
}
