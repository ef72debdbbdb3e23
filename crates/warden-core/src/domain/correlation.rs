//! CorrelationId - producer と worker をまたいでリクエストを追跡する ID
//!
//! 空文字列は構築時にもデシリアライズ時にも拒否されます。
//! producer 側は `generate()` で ULID ベースの ID を払い出せます。

use serde::{Deserialize, Serialize};
use std::fmt;
use ulid::Ulid;

use super::errors::SchemaError;

/// A non-empty correlation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn new(value: impl Into<String>) -> Result<Self, SchemaError> {
        let value = value.into();
        if value.is_empty() {
            return Err(SchemaError::EmptyCorrelationId);
        }
        Ok(Self(value))
    }

    /// Mint a fresh, time-sortable id.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CorrelationId {
    type Error = SchemaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CorrelationId> for String {
    fn from(id: CorrelationId) -> Self {
        id.0
    }
}

impl AsRef<str> for CorrelationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_value() {
        assert!(matches!(
            CorrelationId::new(""),
            Err(SchemaError::EmptyCorrelationId)
        ));
    }

    #[test]
    fn deserialize_rejects_empty_string() {
        let result: Result<CorrelationId, _> = serde_json::from_str("\"\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("correlation_id must not be empty"));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = CorrelationId::new("req-42").unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("req-42"));
    }

    #[test]
    fn generated_ids_are_distinct_and_non_empty() {
        let a = CorrelationId::generate();
        let b = CorrelationId::generate();
        assert!(!a.as_str().is_empty());
        assert_ne!(a, b);
    }
}
