//! Typed - 型付き Task API
//!
//! payload の検証を task の境界で一度だけ行い、
//! task ロジックは検証済みの型付きデータだけを扱います。
//!
//! # 二層構造
//! - **表層（Typed）**: `TaskData`, `TaskBase`, `Task`, `AsyncTask` - 型安全
//! - **内部（Dyn）**: `DynTask` - object-safe, type erasure（`TaskRegistry` が生成）

pub mod codec;
pub mod handler;
pub mod registry;
pub mod task;
pub mod task_data;

// 主要な trait/型 を再エクスポート
pub use self::codec::{CORRELATION_ID_KEY, PayloadCodec};
pub use self::handler::DynTask;
pub use self::registry::{RegistryError, TaskRegistry};
pub use self::task::{AsyncTask, Task, TaskBase, revive};
pub use self::task_data::TaskData;
