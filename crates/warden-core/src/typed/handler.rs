//! DynTask - 復元済み task の型消去
//!
//! # 学習ポイント
//! - Object-safe trait (DynTask)
//! - Type erasure パターン (AsyncTaskAdapter<T> / BlockingTaskAdapter<T> → DynTask)
//! - blocking task は `spawn_blocking` に逃がして executor を止めない

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};

use super::task::{AsyncTask, Task, TaskBase};
use super::task_data::TaskData;
use crate::domain::correlation::CorrelationId;
use crate::domain::errors::{BoxError, TaskError};

/// DynTask は object-safe な「実行待ちの task」
///
/// `TaskRegistry::revive` が返す形で、worker は具体的な型を知らずに実行できます。
/// 出力は `serde_json::Value` にシリアライズして返します。
#[async_trait]
pub trait DynTask: Send {
    fn task_type(&self) -> &'static str;

    fn correlation_id(&self) -> &CorrelationId;

    async fn run(self: Box<Self>) -> Result<serde_json::Value, TaskError>;
}

pub struct AsyncTaskAdapter<T: AsyncTask> {
    task: T,
}

impl<T: AsyncTask> AsyncTaskAdapter<T> {
    pub fn new(task: T) -> Self {
        Self { task }
    }
}

#[async_trait]
impl<T> DynTask for AsyncTaskAdapter<T>
where
    T: AsyncTask + 'static,
    T::Output: Serialize,
    T::Error: Into<BoxError>,
{
    fn task_type(&self) -> &'static str {
        T::TYPE
    }

    fn correlation_id(&self) -> &CorrelationId {
        self.task.task_data().correlation_id()
    }

    async fn run(self: Box<Self>) -> Result<serde_json::Value, TaskError> {
        let correlation_id = self.correlation_id().clone();
        debug!(task_type = T::TYPE, %correlation_id, "running async task");
        let result = self.task.exec().await;
        finish::<T, _, _>(&correlation_id, result)
    }
}

pub struct BlockingTaskAdapter<T: Task> {
    task: T,
}

impl<T: Task> BlockingTaskAdapter<T> {
    pub fn new(task: T) -> Self {
        Self { task }
    }
}

#[async_trait]
impl<T> DynTask for BlockingTaskAdapter<T>
where
    T: Task + Send + 'static,
    T::Output: Serialize + Send + 'static,
    T::Error: Into<BoxError> + Send + 'static,
{
    fn task_type(&self) -> &'static str {
        T::TYPE
    }

    fn correlation_id(&self) -> &CorrelationId {
        self.task.task_data().correlation_id()
    }

    async fn run(self: Box<Self>) -> Result<serde_json::Value, TaskError> {
        let correlation_id = self.correlation_id().clone();
        debug!(task_type = T::TYPE, %correlation_id, "running blocking task");
        let task = self.task;
        match tokio::task::spawn_blocking(move || task.exec()).await {
            Ok(result) => finish::<T, _, _>(&correlation_id, result),
            Err(join) => {
                error!(task_type = T::TYPE, %correlation_id, error = %join, "blocking task aborted");
                Err(TaskError::exec(T::TYPE, join))
            }
        }
    }
}

fn finish<T, O, E>(
    correlation_id: &CorrelationId,
    result: Result<O, E>,
) -> Result<serde_json::Value, TaskError>
where
    T: TaskBase,
    O: Serialize,
    E: Into<BoxError>,
{
    let output = result.map_err(|e| {
        let source: BoxError = e.into();
        error!(task_type = T::TYPE, %correlation_id, error = %source, "task failed");
        TaskError::Exec {
            task_type: T::TYPE,
            source,
        }
    })?;
    serde_json::to_value(output).map_err(|e| TaskError::exec(T::TYPE, e))
}
