//! Common types for the shared crate

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Opaque identifier for products, users and orders.
///
/// The backends send ids either as JSON strings (`"cpu-ryzen-5600"`) or as
/// numbers (`42`). Both forms are accepted and compared by their textual
/// value, so `"42"` and `42` name the same entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric form, if the id is an integer
    pub fn as_i64(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    /// JSON value the order service expects: a number when the id parses as
    /// one, the raw string otherwise.
    pub fn to_wire(&self) -> serde_json::Value {
        match self.as_i64() {
            Some(n) => serde_json::Value::from(n),
            None => serde_json::Value::from(self.0.clone()),
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
            Unsigned(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Int(n) => Self(n.to_string()),
            RawId::Unsigned(n) => Self(n.to_string()),
        })
    }
}
