//! TaskData trait - task payload の契約
//!
//! # 学習ポイント
//! - Provided methods（`to_payload` / `from_payload`）で変換経路を一本化
//! - Newtype（`CorrelationId`）で「空でない」を型で保証
//! - Trait は直接インスタンス化できない: 具体的なスキーマを持つ型だけが payload になれる
//!
//! ```compile_fail
//! use warden_core::typed::TaskData;
//! let data = TaskData::from_payload(Default::default());
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::codec::PayloadCodec;
use crate::domain::correlation::CorrelationId;
use crate::domain::envelope::Payload;
use crate::domain::errors::TaskDataError;

/// TaskData is an immutable, validated task payload.
///
/// # 使用例
/// ```
/// use serde::{Deserialize, Serialize};
/// use warden_core::domain::CorrelationId;
/// use warden_core::typed::TaskData;
///
/// #[derive(Debug, Serialize, Deserialize)]
/// #[serde(deny_unknown_fields)]
/// struct SendEmailData {
///     correlation_id: CorrelationId,
///     recipient: String,
/// }
///
/// impl TaskData for SendEmailData {
///     fn correlation_id(&self) -> &CorrelationId {
///         &self.correlation_id
///     }
/// }
///
/// let payload = serde_json::json!({ "correlation_id": "c-1", "recipient": "ada@example.com" });
/// let data = SendEmailData::from_payload(payload.as_object().unwrap().clone()).unwrap();
/// assert_eq!(data.recipient, "ada@example.com");
/// ```
///
/// # Trait Bounds
/// - `Serialize`: transport へ渡すため
/// - `DeserializeOwned`: transport から復元するため
/// - `Send + Sync + 'static`: worker 間で受け渡すため
pub trait TaskData: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn correlation_id(&self) -> &CorrelationId;

    /// Serialize to a transport-friendly mapping.
    fn to_payload(&self) -> Result<Payload, TaskDataError> {
        PayloadCodec::encode(self)
    }

    /// Validate and build from a transport mapping.
    fn from_payload(payload: Payload) -> Result<Self, TaskDataError> {
        PayloadCodec::decode(payload)
    }
}
