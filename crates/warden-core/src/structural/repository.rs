//! EntityRepository - 技術非依存のエンティティ保存契約
//!
//! # 設計原則
//! - メソッド名はドメイン寄り（add / get / list / update / remove）
//! - 実装の差し替え（PostgreSQL ↔ in-memory など）は trait object 経由で行う
//! - 技術的な詳細は具体的な repository 側に閉じ込める

use async_trait::async_trait;
use thiserror::Error;

use super::entity::Entity;
use crate::domain::errors::BoxError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("entity already exists: {0}")]
    Conflict(String),

    #[error("repository backend failed")]
    Backend(#[source] BoxError),
}

impl RepositoryError {
    pub fn not_found(id: &impl std::fmt::Debug) -> Self {
        Self::NotFound(format!("{id:?}"))
    }

    pub fn conflict(id: &impl std::fmt::Debug) -> Self {
        Self::Conflict(format!("{id:?}"))
    }

    pub fn backend(err: impl Into<BoxError>) -> Self {
        Self::Backend(err.into())
    }
}

/// EntityRepository は E の保存・取得を抽象化する
///
/// `Query` は実装ごとの検索条件。`list(None)` は全件を返す。
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    type Query: Send + Sync;

    async fn add(&self, entity: E) -> Result<(), RepositoryError>;

    async fn get(&self, id: &E::Id) -> Result<Option<E>, RepositoryError>;

    async fn list(&self, query: Option<Self::Query>) -> Result<Vec<E>, RepositoryError>;

    async fn update(&self, entity: E) -> Result<(), RepositoryError>;

    async fn remove(&self, entity: &E) -> Result<(), RepositoryError>;
}
