//! TaskEnvelope - task_type と payload の“運搬用”データ
//!
//! キューなどの transport から受け取った生のメッセージを表します。
//! payload はまだ検証されていない untyped な key/value mapping です。

use serde::{Deserialize, Serialize};

/// Raw, untyped key/value mapping exchanged with a transport.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// TaskEnvelope は TaskRegistry が task を復元するための入力
///
/// # task_type の命名規約
/// - `{namespace}.{domain}.{action}.v{major}`
/// - 例: `acme.billing.charge.v1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    task_type: String,
    payload: Payload,
}

impl TaskEnvelope {
    pub fn new(task_type: impl Into<String>, payload: Payload) -> Self {
        Self {
            task_type: task_type.into(),
            payload,
        }
    }

    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }
}
