//! warden-core
//!
//! アプリケーションコードの構造を揃えるための契約（patterns）集です。
//!
//! # モジュール構成
//! - **domain**: エラー分類、CorrelationId、TaskEnvelope
//! - **operation**: アクセス確認つき Operation（blocking / async）
//! - **typed**: 型付き Task API（TaskData, Task, AsyncTask, TaskRegistry, PayloadCodec）
//! - **structural**: Entity と EntityRepository
//!
//! 永続化・transport・worker キューは含みません。これらは契約に注入される外部の協力者です。

pub mod domain;
pub mod operation;
pub mod structural;
pub mod typed;
