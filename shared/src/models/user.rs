//! User Model

use crate::types::EntityId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Storefront role
///
/// The auth service spells the customer role `CLIENTE`; both spellings map
/// to [`Role::Client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    #[default]
    Client,
}

impl Role {
    /// Name used by this client (`ADMIN` / `CLIENT`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Client => "CLIENT",
        }
    }

    /// Name the auth service expects on registration
    pub fn backend_name(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Client => "CLIENTE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "CLIENT" | "CLIENTE" => Some(Role::Client),
            _ => None,
        }
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown role: {raw}")))
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: EntityId,
    #[serde(default, alias = "name")]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Full name, falling back to "Usuario" when both parts are blank
    pub fn display_name(&self) -> String {
        let full = [self.first_name.trim(), self.last_name.trim()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            "Usuario".to_string()
        } else {
            full
        }
    }
}

/// Name to show for an optional user (reviews, navbar)
pub fn display_name_or_anonymous(user: Option<&User>) -> String {
    user.map_or_else(|| "Anónimo".to_string(), User::display_name)
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Backend spelling, see [`Role::backend_name`]
    pub role: String,
}

/// `data` of a successful login or registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}
