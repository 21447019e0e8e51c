//! Session gateway (login, registration, validation, logout)

use super::jwt;
use crate::{ClientError, ClientResult, HttpClient};
use serde::{Deserialize, Serialize};
use shared::models::{AuthPayload, LoginRequest, RegisterRequest, Role, User};

/// How much a session can be trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionTrust {
    /// Confirmed by the auth service
    Verified,
    /// Rebuilt from the token payload while the auth service was unreachable
    Unverified,
}

/// Authenticated user plus the bearer token backing it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
    pub trust: SessionTrust,
}

impl Session {
    pub fn is_verified(&self) -> bool {
        self.trust == SessionTrust::Verified
    }

    /// Admin access needs a verified admin session
    pub fn can_administer(&self) -> bool {
        self.is_verified() && self.user.is_admin()
    }
}

/// Registration form
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Auth service client
#[derive(Debug, Clone)]
pub struct SessionGateway {
    http: HttpClient,
    auth_url: String,
}

impl SessionGateway {
    pub fn new(http: HttpClient, auth_url: impl Into<String>) -> Self {
        Self {
            http,
            auth_url: auth_url.into(),
        }
    }

    /// Log in and store the issued token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Email y contraseña son obligatorios".to_string()));
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let url = format!("{}/login", self.auth_url);
        let payload = self
            .http
            .post_public::<AuthPayload, _>(&url, &request)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing login data".to_string()))?;

        tracing::info!(user_id = %payload.user.id, "Logged in");
        self.start(payload)
    }

    /// Register a new account; the service logs it in right away
    pub async fn register(&self, registration: Registration) -> ClientResult<Session> {
        let request = RegisterRequest {
            first_name: registration.first_name,
            last_name: registration.last_name,
            email: registration.email,
            password: registration.password,
            role: registration.role.backend_name().to_string(),
        };
        let url = format!("{}/register", self.auth_url);
        let payload = self
            .http
            .post_public::<AuthPayload, _>(&url, &request)
            .await?
            .data
            .ok_or_else(|| ClientError::InvalidResponse("Missing registration data".to_string()))?;

        tracing::info!(user_id = %payload.user.id, "Registered");
        self.start(payload)
    }

    /// Restore the session behind the stored token
    ///
    /// - no token: `None`
    /// - auth service confirms: verified session
    /// - auth service rejects (401/403) or answers garbage: token cleared, `None`
    /// - auth service unreachable or failing otherwise: the token payload is
    ///   decoded locally and yields an unverified session when still valid
    pub async fn validate(&self) -> ClientResult<Option<Session>> {
        let Some(token) = self.http.token() else {
            return Ok(None);
        };

        let url = format!("{}/validate", self.auth_url);
        match self.http.get::<User>(&url).await {
            Ok(response) => match response.data {
                Some(user) => Ok(Some(Session {
                    user,
                    token,
                    trust: SessionTrust::Verified,
                })),
                None => self.restore_unverified(token),
            },
            Err(e) if e.is_auth() => {
                tracing::info!("Stored session token rejected, clearing it");
                self.http.tokens().clear()?;
                Ok(None)
            }
            Err(e @ (ClientError::InvalidResponse(_) | ClientError::Serialization(_))) => {
                tracing::warn!(error = %e, "Unreadable session validation response, clearing token");
                self.http.tokens().clear()?;
                Ok(None)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session validation unavailable, decoding token locally");
                self.restore_unverified(token)
            }
        }
    }

    /// Drop the stored token
    pub fn logout(&self) -> ClientResult<()> {
        self.http.tokens().clear()
    }

    fn start(&self, payload: AuthPayload) -> ClientResult<Session> {
        if !payload.token.is_empty() {
            self.http.tokens().set(&payload.token)?;
        }
        Ok(Session {
            user: payload.user,
            token: payload.token,
            trust: SessionTrust::Verified,
        })
    }

    fn restore_unverified(&self, token: String) -> ClientResult<Option<Session>> {
        let now = chrono::Utc::now().timestamp();
        match jwt::decode_user(&token, now) {
            Some(user) => Ok(Some(Session {
                user,
                token,
                trust: SessionTrust::Unverified,
            })),
            None => {
                self.http.tokens().clear()?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::EntityId;

    fn user(role: Role) -> User {
        User {
            id: EntityId::from(1),
            first_name: "Ana".to_string(),
            last_name: "Rojas".to_string(),
            email: "ana@example.cl".to_string(),
            role,
            phone: None,
        }
    }

    #[test]
    fn test_unverified_admin_cannot_administer() {
        let verified = Session {
            user: user(Role::Admin),
            token: "t".to_string(),
            trust: SessionTrust::Verified,
        };
        assert!(verified.can_administer());

        let unverified = Session {
            trust: SessionTrust::Unverified,
            ..verified.clone()
        };
        assert!(!unverified.can_administer());

        let client = Session {
            user: user(Role::Client),
            ..verified
        };
        assert!(!client.can_administer());
    }
}
