//! Demo contracts wired into the CLI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use warden_core::domain::{AccessDeniedError, CorrelationId, OperationError};
use warden_core::operation::Operation;
use warden_core::typed::{AsyncTask, RegistryError, Task, TaskBase, TaskData, TaskRegistry};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HelloData {
    correlation_id: CorrelationId,
    name: String,
}

impl TaskData for HelloData {
    fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }
}

/// Greeting template injected at registration.
#[derive(Debug, Clone)]
pub struct Greeter {
    pub salutation: String,
}

pub struct HelloTask {
    data: HelloData,
    greeter: Greeter,
}

impl TaskBase for HelloTask {
    const TYPE: &'static str = "warden.demo.hello.v1";
    type Data = HelloData;
    type Deps = Greeter;

    fn assemble(data: HelloData, greeter: Greeter) -> Self {
        Self { data, greeter }
    }

    fn task_data(&self) -> &HelloData {
        &self.data
    }
}

#[derive(Debug, Serialize)]
pub struct Greeting {
    greeting: String,
}

#[async_trait]
impl AsyncTask for HelloTask {
    type Output = Greeting;
    type Error = std::convert::Infallible;

    async fn exec(self) -> Result<Greeting, Self::Error> {
        Ok(Greeting {
            greeting: format!("{}, {}!", self.greeter.salutation, self.data.name),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WordCountData {
    correlation_id: CorrelationId,
    text: String,
}

impl TaskData for WordCountData {
    fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }
}

pub struct WordCountTask {
    data: WordCountData,
}

impl TaskBase for WordCountTask {
    const TYPE: &'static str = "warden.demo.word_count.v1";
    type Data = WordCountData;
    type Deps = ();

    fn assemble(data: WordCountData, _deps: ()) -> Self {
        Self { data }
    }

    fn task_data(&self) -> &WordCountData {
        &self.data
    }
}

#[derive(Debug, Serialize)]
pub struct WordCount {
    words: usize,
}

impl Task for WordCountTask {
    type Output = WordCount;
    type Error = String;

    fn exec(self) -> Result<WordCount, String> {
        if self.data.text.trim().is_empty() {
            return Err("text is blank".to_string());
        }
        Ok(WordCount {
            words: self.data.text.split_whitespace().count(),
        })
    }
}

pub fn registry() -> Result<TaskRegistry, RegistryError> {
    let mut registry = TaskRegistry::new();
    registry.register_async::<HelloTask>(Greeter {
        salutation: "Hello".to_string(),
    })?;
    registry.register_blocking::<WordCountTask>(())?;
    Ok(registry)
}

#[derive(Debug, Clone)]
pub struct Principal {
    pub name: String,
    pub admin: bool,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct User {
    pub name: String,
    pub created_by: String,
}

pub struct CreateUser {
    current: Principal,
    username: String,
}

impl CreateUser {
    pub fn new(current: Principal, username: impl Into<String>) -> Self {
        Self {
            current,
            username: username.into(),
        }
    }
}

impl Operation for CreateUser {
    type Output = User;
    type Error = OperationError;

    fn verify_access(&self) -> Result<(), OperationError> {
        if !self.current.admin {
            return Err(AccessDeniedError::new(format!(
                "{} is not allowed to create users",
                self.current.name
            ))
            .into());
        }
        Ok(())
    }

    fn perform(self) -> Result<User, OperationError> {
        if self.username.trim().is_empty() {
            return Err(OperationError::invalid("username must not be blank"));
        }
        Ok(User {
            name: self.username,
            created_by: self.current.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use warden_core::domain::{ErrorKind, TaskEnvelope};
    use warden_core::operation::OperationExt;

    fn envelope(task_type: &str, payload: serde_json::Value) -> TaskEnvelope {
        TaskEnvelope::new(task_type, payload.as_object().cloned().unwrap())
    }

    #[tokio::test]
    async fn hello_uses_injected_salutation() {
        let out = registry()
            .unwrap()
            .dispatch(envelope(
                HelloTask::TYPE,
                json!({ "correlation_id": "c", "name": "warden" }),
            ))
            .await
            .unwrap();
        assert_eq!(out, json!({ "greeting": "Hello, warden!" }));
    }

    #[tokio::test]
    async fn word_count_runs_blocking() {
        let out = registry()
            .unwrap()
            .dispatch(envelope(
                WordCountTask::TYPE,
                json!({ "correlation_id": "c", "text": "one two  three" }),
            ))
            .await
            .unwrap();
        assert_eq!(out, json!({ "words": 3 }));
    }

    #[tokio::test]
    async fn word_count_blank_text_is_execution_error() {
        let err = registry()
            .unwrap()
            .dispatch(envelope(
                WordCountTask::TYPE,
                json!({ "correlation_id": "c", "text": "  " }),
            ))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Execution);
    }

    #[test]
    fn create_user_requires_admin() {
        let guest = Principal {
            name: "guest".into(),
            admin: false,
        };
        let err = CreateUser::new(guest, "ada").execute().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
    }

    #[test]
    fn create_user_as_admin() {
        let root = Principal {
            name: "root".into(),
            admin: true,
        };
        let user = CreateUser::new(root, "ada").execute().unwrap();
        assert_eq!(
            user,
            User {
                name: "ada".into(),
                created_by: "root".into()
            }
        );
    }
}
