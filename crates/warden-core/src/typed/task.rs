//! Task traits - 型付き payload 契約を持つバックグラウンド処理
//!
//! # 学習ポイント
//! - Associated Constants (`const TYPE`)
//! - Associated Types で「payload 契約」と「依存」をクラス単位で宣言する
//! - 同じ構築プロトコルを blocking (`Task`) と suspending (`AsyncTask`) で共有する
//!
//! # 構築フロー（`revive`）
//! 1. 生の payload を `Self::Data` の検証経路に通す（失敗はそのまま返す）
//! 2. 検証済みデータと注入された依存から task を組み立てる
//!
//! payload 契約の宣言は必須です。`type Data` を省略するとコンパイルできません。
//!
//! ```compile_fail
//! use warden_core::typed::TaskBase;
//!
//! struct NoContract;
//!
//! impl TaskBase for NoContract {
//!     const TYPE: &'static str = "test.no_contract.v1";
//!     type Deps = ();
//!     fn assemble(_data: Self::Data, _deps: ()) -> Self { NoContract }
//!     fn task_data(&self) -> &Self::Data { unimplemented!() }
//! }
//! ```
//!
//! 抽象 trait そのものも生成できません。
//!
//! ```compile_fail
//! use warden_core::typed::TaskBase;
//! let task = TaskBase::revive(Default::default(), ());
//! ```

use async_trait::async_trait;
use tracing::debug;

use super::task_data::TaskData;
use crate::domain::envelope::Payload;
use crate::domain::errors::TaskDataError;

/// TaskBase は task_type、payload 契約、依存の宣言
///
/// # 使用例
/// ```ignore
/// struct SendEmailTask {
///     data: SendEmailData,
///     mailer: Mailer,
/// }
///
/// impl TaskBase for SendEmailTask {
///     const TYPE: &'static str = "acme.mail.send.v1";
///     type Data = SendEmailData;
///     type Deps = Mailer;
///
///     fn assemble(data: SendEmailData, mailer: Mailer) -> Self {
///         Self { data, mailer }
///     }
///
///     fn task_data(&self) -> &SendEmailData {
///         &self.data
///     }
/// }
/// ```
pub trait TaskBase: Sized {
    /// task_type の定義
    ///
    /// # 命名規約
    /// - `{namespace}.{domain}.{action}.v{major}`
    const TYPE: &'static str;

    /// The payload contract this task is revived from.
    type Data: TaskData;

    /// Collaborators injected at construction (`()` when there are none).
    type Deps;

    /// Build the task from already validated data. Called once by `revive`.
    fn assemble(data: Self::Data, deps: Self::Deps) -> Self;

    fn task_data(&self) -> &Self::Data;

    /// Validate `payload` and build the task.
    fn revive(payload: Payload, deps: Self::Deps) -> Result<Self, TaskDataError> {
        revive::<Self>(payload, deps)
    }
}

/// Validate `payload` through `T::Data` and assemble `T`.
///
/// Validation failures from `T::Data` are returned unchanged.
pub fn revive<T: TaskBase>(payload: Payload, deps: T::Deps) -> Result<T, TaskDataError> {
    let data = T::Data::from_payload(payload)?;
    debug!(
        task_type = T::TYPE,
        correlation_id = %data.correlation_id(),
        "task payload validated"
    );
    Ok(T::assemble(data, deps))
}

/// Blocking task.
pub trait Task: TaskBase {
    type Output;
    type Error;

    fn exec(self) -> Result<Self::Output, Self::Error>;
}

/// Suspending task.
///
/// # Object Safety
/// `exec` は `self` を消費するため object-safe ではありません。
/// 型消去が必要な場合は `TaskRegistry` 経由の `DynTask` を使います。
#[async_trait]
pub trait AsyncTask: TaskBase + Send {
    type Output: Send;
    type Error: Send;

    async fn exec(self) -> Result<Self::Output, Self::Error>;
}
