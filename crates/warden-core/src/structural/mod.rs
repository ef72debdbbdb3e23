//! Structural - repository で永続化されるドメインエンティティの契約
//!
//! ストレージ実装は含みません。具体的な repository は DB 接続などの依存を
//! コンストラクタで受け取り、この trait を実装します。

pub mod entity;
pub mod repository;

pub use self::entity::Entity;
pub use self::repository::{EntityRepository, RepositoryError};
