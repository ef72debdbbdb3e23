//! PayloadCodec - Payload と TaskData の相互変換
//!
//! # デシリアライズフロー
//! 1. `correlation_id` が空文字列なら即座に拒否
//! 2. serde_json で T にデシリアライズ（必須フィールド・型の検証）
//! 3. デシリアライズ中に読み捨てられたキーを未知フィールドとして拒否
//! 4. payload と T の両方が `correlation_id` キーを持つことを確認
//!
//! 3 は `serde_ignored` で検出するため `#[serde(deny_unknown_fields)]` の
//! 付け忘れに依存せず、`alias` や `skip_serializing_if` を使うフィールドも
//! 宣言済みとして扱われます。

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::task_data::TaskData;
use crate::domain::correlation::CorrelationId;
use crate::domain::envelope::Payload;
use crate::domain::errors::{SchemaError, TaskDataError};

/// The key every task payload carries.
pub const CORRELATION_ID_KEY: &str = "correlation_id";

/// PayloadCodec は TaskData の transport 境界
pub struct PayloadCodec;

impl PayloadCodec {
    /// Serialize `value` into a transport mapping.
    pub fn encode<T: TaskData>(value: &T) -> Result<Payload, TaskDataError> {
        let payload = to_mapping(value).map_err(TaskDataError::Serialization)?;
        if !carries_correlation_id(&payload, value.correlation_id()) {
            return Err(TaskDataError::Serialization(
                SchemaError::MissingCorrelationId,
            ));
        }
        debug!(fields = payload.len(), "encoded task payload");
        Ok(payload)
    }

    /// Validate `payload` against `T`'s closed schema and build it.
    pub fn decode<T: TaskData>(payload: Payload) -> Result<T, TaskDataError> {
        if matches!(payload.get(CORRELATION_ID_KEY), Some(Value::String(s)) if s.is_empty()) {
            return Err(TaskDataError::Deserialization(SchemaError::EmptyCorrelationId));
        }
        let received_id = payload.contains_key(CORRELATION_ID_KEY);

        let mut ignored = Vec::new();
        let value: T = serde_ignored::deserialize(Value::Object(payload), |path| {
            ignored.push(path.to_string())
        })
        .map_err(|e| TaskDataError::Deserialization(e.into()))?;

        if let Some(unknown) = ignored.into_iter().next() {
            return Err(TaskDataError::Deserialization(SchemaError::UnknownField(
                unknown,
            )));
        }

        let declared = to_mapping(&value).map_err(TaskDataError::Deserialization)?;
        if !received_id || !carries_correlation_id(&declared, value.correlation_id()) {
            return Err(TaskDataError::Deserialization(
                SchemaError::MissingCorrelationId,
            ));
        }

        debug!(fields = declared.len(), "decoded task payload");
        Ok(value)
    }
}

fn carries_correlation_id(payload: &Payload, id: &CorrelationId) -> bool {
    matches!(payload.get(CORRELATION_ID_KEY), Some(Value::String(s)) if s == id.as_str())
}

fn to_mapping<T: Serialize>(value: &T) -> Result<Payload, SchemaError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(SchemaError::NotAMapping(json_kind(&other))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
