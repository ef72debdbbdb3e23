//! Errors - 契約レイヤーのエラー型と分類
//!
//! 呼び出し側はメッセージ文字列ではなく variant（または [`ErrorKind`]）で分岐します。
//! このレイヤーはエラーを握りつぶさず、リトライもしません。
//!
//! # 分類
//! - **AccessDenied**: `verify_access` が意図的に返す拒否
//! - **ContractMissing**: task_type に対応する payload 契約が登録されていない
//! - **Serialization / Deserialization**: payload 変換の失敗（原因は `source()` で辿れる）
//! - **Invalid**: operation が入力を受け付けなかった
//! - **Execution**: 業務ロジック側の失敗
//!
//! 「未実装メソッドの呼び出し」と「抽象型の直接生成」はコンパイルエラーになるため、
//! ここには variant がありません。

use thiserror::Error;

/// 型消去されたエラー。業務ロジック側のエラーをそのまま運ぶために使う。
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// ErrorKind は失敗の運用分類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    AccessDenied,
    ContractMissing,
    Serialization,
    Deserialization,
    Invalid,
    Execution,
}

/// Raised when the calling principal may not perform an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("access denied: {reason}")]
pub struct AccessDeniedError {
    reason: String,
}

impl AccessDeniedError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// General-purpose error for operations that don't define their own.
///
/// Any operation error type only has to be `From<AccessDeniedError>`; this one
/// is provided so small operations don't need to declare an enum.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    AccessDenied(#[from] AccessDeniedError),

    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("operation failed")]
    Failed(#[source] BoxError),
}

impl OperationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn failed(err: impl Into<BoxError>) -> Self {
        Self::Failed(err.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AccessDenied(_) => ErrorKind::AccessDenied,
            Self::Invalid(_) => ErrorKind::Invalid,
            Self::Failed(_) => ErrorKind::Execution,
        }
    }
}

/// The reason a payload does not satisfy a task data schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("correlation_id must not be empty")]
    EmptyCorrelationId,

    #[error("payload must carry `correlation_id`")]
    MissingCorrelationId,

    #[error("expected a key/value mapping, got {0}")]
    NotAMapping(&'static str),
}

/// TaskDataError は payload 変換の失敗
///
/// どちらの variant も元の原因を `source()` として保持します。
#[derive(Debug, Error)]
pub enum TaskDataError {
    #[error("failed to serialize task data")]
    Serialization(#[source] SchemaError),

    #[error("failed to deserialize task data")]
    Deserialization(#[source] SchemaError),
}

impl TaskDataError {
    /// The underlying schema failure, whichever direction it happened in.
    pub fn schema(&self) -> &SchemaError {
        match self {
            Self::Serialization(e) | Self::Deserialization(e) => e,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Deserialization(_) => ErrorKind::Deserialization,
        }
    }
}

/// TaskError は task の復元（revive）と実行の失敗
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("no payload contract registered for task_type={0}")]
    ContractMissing(String),

    #[error(transparent)]
    Data(#[from] TaskDataError),

    #[error("task {task_type} failed")]
    Exec {
        task_type: &'static str,
        #[source]
        source: BoxError,
    },
}

impl TaskError {
    pub fn exec(task_type: &'static str, err: impl Into<BoxError>) -> Self {
        Self::Exec {
            task_type,
            source: err.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ContractMissing(_) => ErrorKind::ContractMissing,
            Self::Data(e) => e.kind(),
            Self::Exec { .. } => ErrorKind::Execution,
        }
    }
}
