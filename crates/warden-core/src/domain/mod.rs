//! Domain model（エラー分類、correlation ID、transport 用 envelope）

pub mod correlation;
pub mod envelope;
pub mod errors;

pub use self::correlation::CorrelationId;
pub use self::envelope::{Payload, TaskEnvelope};
pub use self::errors::{
    AccessDeniedError, BoxError, ErrorKind, OperationError, SchemaError, TaskDataError, TaskError,
};
