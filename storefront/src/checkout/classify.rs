//! Classification of order submission failures
//!
//! A structured `errorCode` in the response envelope decides the kind when
//! present. Older order services only send free text, so the message and
//! status are matched as a fallback, stock first and validation last.

use shared::ErrorCode;
use storefront_client::ClientError;

pub const CONNECTIVITY_MESSAGE: &str =
    "No se pudo conectar con el servidor. Verifica tu conexión e intenta de nuevo.";
pub const OUT_OF_STOCK_MESSAGE: &str =
    "Uno o más productos están agotados. Por favor, elimínalos del carrito e intenta de nuevo.";
pub const VALIDATION_MESSAGE: &str = "Los datos proporcionados no son válidos. Por favor, revísalos.";
pub const SESSION_EXPIRED_MESSAGE: &str = "Tu sesión ha expirado. Por favor, inicia sesión de nuevo.";
pub const FORBIDDEN_MESSAGE: &str = "No tienes permisos para realizar esta acción.";
pub const NOT_FOUND_MESSAGE: &str = "El recurso solicitado no fue encontrado.";
pub const GENERIC_MESSAGE: &str = "Ocurrió un error. Por favor, intenta de nuevo.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    OutOfStock,
    InsufficientStock,
    Validation,
    /// Missing, invalid or expired session
    Auth,
    Forbidden,
    NotFound,
    Generic,
}

impl FailureKind {
    /// Stock failures re-fetch the catalog and prune the cart
    pub fn refreshes_catalog(&self) -> bool {
        matches!(self, FailureKind::OutOfStock | FailureKind::InsufficientStock)
    }

    /// Auth failures send the user back to login
    pub fn redirects_to_login(&self) -> bool {
        matches!(self, FailureKind::Auth | FailureKind::Forbidden)
    }

    fn from_error_code(code: &str) -> Option<Self> {
        match code {
            "OUT_OF_STOCK" => Some(FailureKind::OutOfStock),
            "INSUFFICIENT_STOCK" => Some(FailureKind::InsufficientStock),
            "VALIDATION_ERROR" => Some(FailureKind::Validation),
            "AUTH_ERROR" => Some(FailureKind::Auth),
            _ => None,
        }
    }

    fn error_code(&self) -> Option<ErrorCode> {
        match self {
            FailureKind::OutOfStock => Some(ErrorCode::ProductOutOfStock),
            FailureKind::InsufficientStock => Some(ErrorCode::ProductInsufficientStock),
            FailureKind::Validation => Some(ErrorCode::ValidationFailed),
            FailureKind::Auth => Some(ErrorCode::NotAuthenticated),
            FailureKind::Forbidden => Some(ErrorCode::PermissionDenied),
            FailureKind::NotFound => Some(ErrorCode::NotFound),
            FailureKind::Generic => None,
        }
    }
}

/// Classified failure with the message to show the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub kind: FailureKind,
    pub code: ErrorCode,
    pub message: String,
}

/// Classify a failed order submission
pub fn classify(err: &ClientError) -> Classified {
    match err {
        ClientError::Connect(_) | ClientError::Timeout(_) => Classified {
            kind: FailureKind::Generic,
            code: err.code(),
            message: CONNECTIVITY_MESSAGE.to_string(),
        },
        ClientError::NotAuthenticated => Classified {
            kind: FailureKind::Auth,
            code: err.code(),
            message: SESSION_EXPIRED_MESSAGE.to_string(),
        },
        ClientError::Api {
            status,
            message,
            error_code,
        } => {
            let kind = error_code
                .as_deref()
                .and_then(FailureKind::from_error_code)
                .unwrap_or_else(|| classify_legacy(*status, message));
            let code = match kind.error_code() {
                Some(code) => code,
                // A 4xx without a recognizable cause is the order service refusing the order
                None if (400..500).contains(status) => ErrorCode::OrderRejected,
                None => err.code(),
            };
            Classified {
                kind,
                code,
                message: user_message(kind, message),
            }
        }
        _ => Classified {
            kind: FailureKind::Generic,
            code: err.code(),
            message: GENERIC_MESSAGE.to_string(),
        },
    }
}

fn classify_legacy(status: u16, message: &str) -> FailureKind {
    let lower = message.to_lowercase();
    let mentions = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if mentions(&["agotado", "no hay unidades disponibles"]) {
        FailureKind::OutOfStock
    } else if mentions(&["insuficiente"]) {
        FailureKind::InsufficientStock
    } else if status == 401 || mentions(&["token inválido", "expirado"]) {
        FailureKind::Auth
    } else if status == 403 || mentions(&["no proporcionado", "sin permisos"]) {
        FailureKind::Forbidden
    } else if status == 404 || mentions(&["no encontrado", "not found"]) {
        FailureKind::NotFound
    } else if status == 400 || mentions(&["validación", "inválido"]) {
        FailureKind::Validation
    } else {
        FailureKind::Generic
    }
}

fn user_message(kind: FailureKind, raw: &str) -> String {
    match kind {
        FailureKind::OutOfStock => OUT_OF_STOCK_MESSAGE.to_string(),
        FailureKind::InsufficientStock if !raw.trim().is_empty() => raw.to_string(),
        FailureKind::InsufficientStock => GENERIC_MESSAGE.to_string(),
        FailureKind::Validation if !raw.trim().is_empty() => raw.to_string(),
        FailureKind::Validation => VALIDATION_MESSAGE.to_string(),
        FailureKind::Auth => SESSION_EXPIRED_MESSAGE.to_string(),
        FailureKind::Forbidden => FORBIDDEN_MESSAGE.to_string(),
        FailureKind::NotFound => NOT_FOUND_MESSAGE.to_string(),
        FailureKind::Generic => GENERIC_MESSAGE.to_string(),
    }
}
