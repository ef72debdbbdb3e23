//! TaskRegistry - task_type から task を復元する
//!
//! # 学習ポイント
//! - HashMap での型消去されたクロージャ（reviver）の管理
//! - Generic methods での登録と型安全性
//! - 依存はクロージャに捕捉し、復元のたびに clone して注入する
//!
//! worker 側の入口です。transport から届いた `TaskEnvelope` を
//! `revive()` で実行可能な `DynTask` に変換します。

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::handler::{AsyncTaskAdapter, BlockingTaskAdapter, DynTask};
use super::task::{AsyncTask, Task, revive};
use crate::domain::envelope::{Payload, TaskEnvelope};
use crate::domain::errors::{BoxError, TaskDataError, TaskError};

type Reviver = Box<dyn Fn(Payload) -> Result<Box<dyn DynTask>, TaskDataError> + Send + Sync>;

/// TaskRegistry は task_type ごとの payload 契約と依存を保持する
///
/// # 使用例
/// ```ignore
/// let mut registry = TaskRegistry::new();
/// registry.register_async::<SendEmailTask>(mailer)?;
///
/// let task = registry.revive(envelope)?;
/// let output = task.run().await?;
/// ```
#[derive(Default)]
pub struct TaskRegistry {
    revivers: HashMap<&'static str, Reviver>,
}

/// RegistryError は TaskRegistry の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Task type '{0}' is already registered")]
    AlreadyRegistered(&'static str),
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self {
            revivers: HashMap::new(),
        }
    }

    /// Register a suspending task; `deps` is cloned into every revived instance.
    pub fn register_async<T>(&mut self, deps: T::Deps) -> Result<(), RegistryError>
    where
        T: AsyncTask + 'static,
        T::Deps: Clone + Send + Sync + 'static,
        T::Output: Serialize,
        T::Error: Into<BoxError>,
    {
        self.insert(
            T::TYPE,
            Box::new(move |payload: Payload| -> Result<Box<dyn DynTask>, TaskDataError> {
                let task = revive::<T>(payload, deps.clone())?;
                Ok(Box::new(AsyncTaskAdapter::new(task)) as Box<dyn DynTask>)
            }),
        )
    }

    /// Register a blocking task. It runs on tokio's blocking pool when revived.
    pub fn register_blocking<T>(&mut self, deps: T::Deps) -> Result<(), RegistryError>
    where
        T: Task + Send + 'static,
        T::Deps: Clone + Send + Sync + 'static,
        T::Output: Serialize + Send + 'static,
        T::Error: Into<BoxError> + Send + 'static,
    {
        self.insert(
            T::TYPE,
            Box::new(move |payload: Payload| -> Result<Box<dyn DynTask>, TaskDataError> {
                let task = revive::<T>(payload, deps.clone())?;
                Ok(Box::new(BlockingTaskAdapter::new(task)) as Box<dyn DynTask>)
            }),
        )
    }

    fn insert(&mut self, task_type: &'static str, reviver: Reviver) -> Result<(), RegistryError> {
        if self.revivers.contains_key(task_type) {
            return Err(RegistryError::AlreadyRegistered(task_type));
        }
        self.revivers.insert(task_type, reviver);
        info!(task_type, "registered task contract");
        Ok(())
    }

    /// Validate the envelope's payload against its registered contract.
    pub fn revive(&self, envelope: TaskEnvelope) -> Result<Box<dyn DynTask>, TaskError> {
        let Some(reviver) = self.revivers.get(envelope.task_type()) else {
            warn!(task_type = envelope.task_type(), "no payload contract registered");
            return Err(TaskError::ContractMissing(envelope.task_type().to_string()));
        };
        let task = reviver(envelope.into_payload())?;
        debug!(task_type = task.task_type(), correlation_id = %task.correlation_id(), "task revived");
        Ok(task)
    }

    /// Revive and run in one step.
    pub async fn dispatch(&self, envelope: TaskEnvelope) -> Result<serde_json::Value, TaskError> {
        self.revive(envelope)?.run().await
    }

    pub fn contains(&self, task_type: &str) -> bool {
        self.revivers.contains_key(task_type)
    }

    /// Registered task types, sorted.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut types: Vec<&'static str> = self.revivers.keys().copied().collect();
        types.sort_unstable();
        types
    }
}
