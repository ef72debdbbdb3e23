//! Entity - repository で扱うドメインオブジェクトの契約
//!
//! ID 型は実装ごとに associated type で固定し、作成・更新時刻は UTC で持ちます。

use chrono::{DateTime, Utc};
use std::fmt::Debug;
use std::hash::Hash;

/// Entity は具体的な ID 型を持つドメインオブジェクト
///
/// `Id` は associated type なので、ID 型を決めずに実装することはできません。
///
/// # 使用例
/// ```
/// use chrono::{DateTime, Utc};
/// use warden_core::structural::Entity;
///
/// struct Note {
///     id: u64,
///     title: String,
///     created_at: DateTime<Utc>,
///     updated_at: DateTime<Utc>,
/// }
///
/// impl Entity for Note {
///     type Id = u64;
///
///     fn id(&self) -> &u64 {
///         &self.id
///     }
///
///     fn created_at(&self) -> DateTime<Utc> {
///         self.created_at
///     }
///
///     fn updated_at(&self) -> DateTime<Utc> {
///         self.updated_at
///     }
/// }
/// ```
pub trait Entity: Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;
}
