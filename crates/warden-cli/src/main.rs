mod demo;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use warden_core::domain::{CorrelationId, OperationError, Payload, TaskEnvelope, TaskError};
use warden_core::operation::OperationExt;
use warden_core::typed::CORRELATION_ID_KEY;

use crate::demo::{CreateUser, Principal};
use crate::logging::{LogFormat, LoggingConfig, init_logging};

#[derive(Debug, Parser)]
#[command(name = "warden", about = "Exercise task and operation contracts")]
struct Cli {
    /// trace, debug, info, warn, error, off (WARDEN_LOG overrides)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List registered task types.
    Types,

    /// Validate a payload against a task's contract without running it.
    Check(TaskArgs),

    /// Validate and run a task, printing its output as JSON.
    Run(TaskArgs),

    /// Run the demo create-user operation.
    Op {
        #[arg(long)]
        user: String,

        #[arg(long)]
        admin: bool,

        #[arg(long)]
        username: String,
    },
}

#[derive(Debug, clap::Args)]
struct TaskArgs {
    #[arg(long)]
    task_type: String,

    /// JSON object, e.g. '{"correlation_id":"c-1","name":"ada"}'
    #[arg(long)]
    payload: String,

    /// Fill in a fresh correlation_id when the payload has none.
    #[arg(long)]
    new_correlation_id: bool,
}

impl TaskArgs {
    fn envelope(&self) -> Result<TaskEnvelope> {
        let mut payload: Payload =
            serde_json::from_str(&self.payload).context("payload is not a JSON object")?;
        if self.new_correlation_id && !payload.contains_key(CORRELATION_ID_KEY) {
            let id = CorrelationId::generate();
            info!(correlation_id = %id, "generated correlation id");
            payload.insert(CORRELATION_ID_KEY.to_string(), id.to_string().into());
        }
        Ok(TaskEnvelope::new(&self.task_type, payload))
    }
}

fn task_failure(err: TaskError) -> anyhow::Error {
    let kind = err.kind();
    anyhow::Error::new(err).context(format!("{kind:?}"))
}

fn operation_failure(err: OperationError) -> anyhow::Error {
    let kind = err.kind();
    anyhow::Error::new(err).context(format!("{kind:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig {
        level: cli.log_level.clone(),
        format: cli.log_format,
    })?;

    let registry = demo::registry()?;

    match cli.command {
        Command::Types => {
            for task_type in registry.registered_types() {
                println!("{task_type}");
            }
        }
        Command::Check(args) => {
            let task = registry.revive(args.envelope()?).map_err(task_failure)?;
            println!("ok {} correlation_id={}", task.task_type(), task.correlation_id());
        }
        Command::Run(args) => {
            let output = registry
                .dispatch(args.envelope()?)
                .await
                .map_err(task_failure)?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Op {
            user,
            admin,
            username,
        } => {
            let current = Principal { name: user, admin };
            let created = CreateUser::new(current, username)
                .execute()
                .map_err(operation_failure)?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
    }

    Ok(())
}
