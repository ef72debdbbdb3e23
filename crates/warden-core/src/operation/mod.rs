//! Operation - アクセス確認つきのアプリケーション処理
//!
//! 「実行してよいか」(`verify_access`) と「何をするか」(`perform`) を分け、
//! それぞれ単体でテストできるようにします。入口の `execute` は必ず
//! `verify_access` を先に完了させ、拒否された場合は `perform` を呼びません。
//!
//! # 学習ポイント
//! - Blanket impl による拡張 trait（`OperationExt`）: 実装側は `execute` を上書きできない
//! - Associated Types (`Output`, `Error`) と `From<AccessDeniedError>` 境界
//! - `self` を消費する実行: 1 インスタンス = 1 回の呼び出し
//!
//! 依存（repository、現在のユーザーなど）は具体型のコンストラクタで受け取ります。
//!
//! ```
//! use warden_core::domain::{AccessDeniedError, OperationError};
//! use warden_core::operation::{Operation, OperationExt};
//!
//! struct Principal { admin: bool }
//!
//! struct CreateUser<'a> {
//!     current: &'a Principal,
//!     name: String,
//! }
//!
//! impl Operation for CreateUser<'_> {
//!     type Output = String;
//!     type Error = OperationError;
//!
//!     fn verify_access(&self) -> Result<(), OperationError> {
//!         if !self.current.admin {
//!             return Err(AccessDeniedError::new("only admins can create users").into());
//!         }
//!         Ok(())
//!     }
//!
//!     fn perform(self) -> Result<String, OperationError> {
//!         Ok(self.name)
//!     }
//! }
//!
//! let admin = Principal { admin: true };
//! let op = CreateUser { current: &admin, name: "ada".into() };
//! assert_eq!(op.execute().unwrap(), "ada");
//! ```
//!
//! `verify_access` を実装しない operation はコンパイルできません。
//!
//! ```compile_fail
//! use warden_core::domain::OperationError;
//! use warden_core::operation::Operation;
//!
//! struct Unchecked;
//!
//! impl Operation for Unchecked {
//!     type Output = ();
//!     type Error = OperationError;
//!
//!     fn perform(self) -> Result<(), OperationError> {
//!         Ok(())
//!     }
//! }
//! ```

mod guard;

use async_trait::async_trait;

use self::guard::authorize;
use crate::domain::errors::AccessDeniedError;

/// Blocking operation.
pub trait Operation: Sized {
    type Output;
    type Error: From<AccessDeniedError>;

    /// Fail with an access-denied error when the principal is not authorized.
    fn verify_access(&self) -> Result<(), Self::Error>;

    /// The operation logic. Only reached through `execute` after access is granted.
    fn perform(self) -> Result<Self::Output, Self::Error>;
}

/// Entry point for every [`Operation`].
///
/// Blanket-implemented, so the access check cannot be skipped by overriding it.
pub trait OperationExt: Operation {
    fn execute(self) -> Result<Self::Output, Self::Error>;
}

impl<T: Operation> OperationExt for T {
    fn execute(self) -> Result<T::Output, T::Error> {
        authorize(std::any::type_name::<T>(), || self.verify_access())?;
        self.perform()
    }
}

/// Suspending operation.
///
/// `verify_access` stays synchronous: it completes before the first suspension point.
#[async_trait]
pub trait AsyncOperation: Sized + Send {
    type Output: Send;
    type Error: From<AccessDeniedError> + Send;

    fn verify_access(&self) -> Result<(), Self::Error>;

    async fn perform(self) -> Result<Self::Output, Self::Error>;
}

/// Entry point for every [`AsyncOperation`].
#[async_trait]
pub trait AsyncOperationExt: AsyncOperation {
    async fn execute(self) -> Result<Self::Output, Self::Error>;
}

#[async_trait]
impl<T: AsyncOperation> AsyncOperationExt for T {
    async fn execute(self) -> Result<T::Output, T::Error> {
        authorize(std::any::type_name::<T>(), || self.verify_access())?;
        self.perform().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{ErrorKind, OperationError};
    use rstest::rstest;
    use std::cell::Cell;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct ExampleResult {
        value: i32,
    }

    struct FlagOperation<'a> {
        allow: bool,
        access_checked: &'a Cell<bool>,
        performed: &'a Cell<u32>,
    }

    impl Operation for FlagOperation<'_> {
        type Output = ExampleResult;
        type Error = OperationError;

        fn verify_access(&self) -> Result<(), OperationError> {
            self.access_checked.set(true);
            if self.allow {
                Ok(())
            } else {
                Err(AccessDeniedError::new("denied").into())
            }
        }

        fn perform(self) -> Result<ExampleResult, OperationError> {
            assert!(self.access_checked.get(), "perform ran before verify_access");
            self.performed.set(self.performed.get() + 1);
            Ok(ExampleResult { value: 1 })
        }
    }

    #[rstest]
    #[case::granted(true, 1)]
    #[case::denied(false, 0)]
    fn execute_runs_perform_only_after_access(#[case] allow: bool, #[case] expected_runs: u32) {
        let access_checked = Cell::new(false);
        let performed = Cell::new(0);
        let op = FlagOperation {
            allow,
            access_checked: &access_checked,
            performed: &performed,
        };

        let result = op.execute();

        assert!(access_checked.get());
        assert_eq!(performed.get(), expected_runs);
        assert_eq!(result.is_ok(), allow);
    }

    #[test]
    fn execute_surfaces_exactly_the_access_denied_error() {
        let checked = Cell::new(false);
        let performed = Cell::new(0);
        let op = FlagOperation {
            allow: false,
            access_checked: &checked,
            performed: &performed,
        };

        match op.execute() {
            Err(OperationError::AccessDenied(e)) => assert_eq!(e.reason(), "denied"),
            other => panic!("expected access denied, got {other:?}"),
        }
    }

    #[test]
    fn execute_returns_perform_result_unchanged() {
        let checked = Cell::new(false);
        let performed = Cell::new(0);
        let op = FlagOperation {
            allow: true,
            access_checked: &checked,
            performed: &performed,
        };
        assert_eq!(op.execute().unwrap(), ExampleResult { value: 1 });
    }

    /// Operation with its own error type.
    #[derive(Debug, PartialEq)]
    enum QuotaError {
        Denied(AccessDeniedError),
        Exhausted,
    }

    impl From<AccessDeniedError> for QuotaError {
        fn from(e: AccessDeniedError) -> Self {
            Self::Denied(e)
        }
    }

    struct SpendQuota {
        remaining: u32,
    }

    impl Operation for SpendQuota {
        type Output = u32;
        type Error = QuotaError;

        fn verify_access(&self) -> Result<(), QuotaError> {
            Ok(())
        }

        fn perform(self) -> Result<u32, QuotaError> {
            self.remaining.checked_sub(1).ok_or(QuotaError::Exhausted)
        }
    }

    #[test]
    fn perform_failure_propagates_unchanged() {
        assert_eq!(SpendQuota { remaining: 2 }.execute(), Ok(1));
        assert_eq!(
            SpendQuota { remaining: 0 }.execute(),
            Err(QuotaError::Exhausted)
        );
    }

    struct AsyncSpendQuota {
        remaining: u32,
    }

    #[async_trait]
    impl AsyncOperation for AsyncSpendQuota {
        type Output = u32;
        type Error = QuotaError;

        fn verify_access(&self) -> Result<(), QuotaError> {
            Ok(())
        }

        async fn perform(self) -> Result<u32, QuotaError> {
            tokio::task::yield_now().await;
            self.remaining.checked_sub(1).ok_or(QuotaError::Exhausted)
        }
    }

    #[tokio::test]
    async fn async_perform_failure_propagates_unchanged() {
        assert_eq!(AsyncSpendQuota { remaining: 2 }.execute().await, Ok(1));
        assert_eq!(
            AsyncSpendQuota { remaining: 0 }.execute().await,
            Err(QuotaError::Exhausted)
        );
    }

    struct AsyncFlagOperation {
        allow: bool,
        performed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AsyncOperation for AsyncFlagOperation {
        type Output = ExampleResult;
        type Error = OperationError;

        fn verify_access(&self) -> Result<(), OperationError> {
            if self.allow {
                Ok(())
            } else {
                Err(AccessDeniedError::new("denied").into())
            }
        }

        async fn perform(self) -> Result<ExampleResult, OperationError> {
            tokio::task::yield_now().await;
            self.performed.fetch_add(1, Ordering::SeqCst);
            Ok(ExampleResult { value: 1 })
        }
    }

    #[tokio::test]
    async fn async_execute_runs_perform_once_when_granted() {
        let performed = Arc::new(AtomicUsize::new(0));
        let op = AsyncFlagOperation {
            allow: true,
            performed: performed.clone(),
        };

        assert_eq!(op.execute().await.unwrap(), ExampleResult { value: 1 });
        assert_eq!(performed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn async_execute_never_performs_when_denied() {
        let performed = Arc::new(AtomicUsize::new(0));
        let op = AsyncFlagOperation {
            allow: false,
            performed: performed.clone(),
        };

        let err = op.execute().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AccessDenied);
        assert_eq!(performed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn verify_access_is_testable_on_its_own() {
        let op = AsyncFlagOperation {
            allow: false,
            performed: Arc::default(),
        };
        assert!(matches!(
            op.verify_access(),
            Err(OperationError::AccessDenied(_))
        ));
    }
}
