//! 「アクセス確認 → 実行」の順序を一箇所にまとめる
//!
//! blocking / suspending の両方の `execute` がここを通ります。

use tracing::{debug, warn};

/// Run `check` to completion; on failure return its error unchanged.
pub(crate) fn authorize<E>(
    operation: &'static str,
    check: impl FnOnce() -> Result<(), E>,
) -> Result<(), E> {
    match check() {
        Ok(()) => {
            debug!(operation, "access granted");
            Ok(())
        }
        Err(err) => {
            warn!(operation, "access denied, operation not executed");
            Err(err)
        }
    }
}
