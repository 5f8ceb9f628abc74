//! # 非同期コンビネータ
//!
//! 後で完了する処理（リポジトリ呼び出しなど）を処理結果の連鎖に組み込む。
//!
//! 同期版と連鎖の意味は同じで、最初の失敗で後続を止め、ハンドラはどちらか
//! 一方しか実行しない。違いはスケジューリングだけで、前段の待機が解決するまで
//! 次段は始まらない。
//!
//! 返す Future はすべて `Send` なので、axum のハンドラ内でそのまま `.await` できる。

use std::{fmt::Display, future::Future, panic::AssertUnwindSafe};

use futures_util::FutureExt;

use super::{EXCEPTION_CODE, Outcome, panic_to_error};
use crate::DomainError;

/// 処理結果の非同期拡張メソッド
pub trait AsyncOutcomeExt<T>: Sized {
    /// 成功値を非同期処理で変換する
    fn map_async<U, F, Fut>(self, f: F) -> impl Future<Output = Outcome<U>> + Send
    where
        T: Send,
        F: FnOnce(T) -> Fut + Send,
        Fut: Future<Output = U> + Send;

    /// 成功値を受け取り、処理結果を返す非同期処理へつなぐ
    fn bind_async<U, F, Fut>(self, f: F) -> impl Future<Output = Outcome<U>> + Send
    where
        T: Send,
        F: FnOnce(T) -> Fut + Send,
        Fut: Future<Output = Outcome<U>> + Send;

    /// 成功時だけ非同期の副作用を実行し、完了を待ってから元の処理結果を返す
    ///
    /// `f` は成功値の参照を受け取るが、返す Future はその参照を保持できない。
    /// 必要な値は `f` の中で複製して Future に移すこと。
    fn tap_async<F, Fut>(self, f: F) -> impl Future<Output = Self> + Send
    where
        T: Send,
        F: FnOnce(&T) -> Fut + Send,
        Fut: Future + Send;

    /// 成功・失敗のどちらか一方の非同期ハンドラだけを実行する
    fn fold_async<R, S, SFut, E, EFut>(
        self,
        on_success: S,
        on_failure: E,
    ) -> impl Future<Output = R> + Send
    where
        T: Send,
        S: FnOnce(T) -> SFut + Send,
        SFut: Future<Output = R> + Send,
        E: FnOnce(DomainError) -> EFut + Send,
        EFut: Future<Output = R> + Send;
}

impl<T> AsyncOutcomeExt<T> for Outcome<T> {
    fn map_async<U, F, Fut>(self, f: F) -> impl Future<Output = Outcome<U>> + Send
    where
        T: Send,
        F: FnOnce(T) -> Fut + Send,
        Fut: Future<Output = U> + Send,
    {
        async move {
            match self {
                Ok(value) => Ok(f(value).await),
                Err(error) => Err(error),
            }
        }
    }

    fn bind_async<U, F, Fut>(self, f: F) -> impl Future<Output = Outcome<U>> + Send
    where
        T: Send,
        F: FnOnce(T) -> Fut + Send,
        Fut: Future<Output = Outcome<U>> + Send,
    {
        async move {
            match self {
                Ok(value) => f(value).await,
                Err(error) => Err(error),
            }
        }
    }

    fn tap_async<F, Fut>(self, f: F) -> impl Future<Output = Self> + Send
    where
        T: Send,
        F: FnOnce(&T) -> Fut + Send,
        Fut: Future + Send,
    {
        async move {
            match self {
                Ok(value) => {
                    f(&value).await;
                    Ok(value)
                }
                Err(error) => Err(error),
            }
        }
    }

    fn fold_async<R, S, SFut, E, EFut>(
        self,
        on_success: S,
        on_failure: E,
    ) -> impl Future<Output = R> + Send
    where
        T: Send,
        S: FnOnce(T) -> SFut + Send,
        SFut: Future<Output = R> + Send,
        E: FnOnce(DomainError) -> EFut + Send,
        EFut: Future<Output = R> + Send,
    {
        async move {
            match self {
                Ok(value) => on_success(value).await,
                Err(error) => on_failure(error).await,
            }
        }
    }
}

/// 失敗しうる非同期処理を待ち、その失敗を処理結果に取り込む
///
/// [`attempt`](super::attempt) の非同期版。ポーリング中の panic も捕捉する。
pub async fn attempt_async<T, E, Fut>(operation: Fut) -> Outcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    attempt_async_with(operation, |e| {
        DomainError::failure(EXCEPTION_CODE, e.to_string())
    })
    .await
}

/// [`attempt_async`] のエラー変換を呼び出し元が指定する版
pub async fn attempt_async_with<T, E, Fut, H>(operation: Fut, handler: H) -> Outcome<T>
where
    Fut: Future<Output = Result<T, E>>,
    H: FnOnce(E) -> DomainError,
{
    match AssertUnwindSafe(operation).catch_unwind().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(handler(error)),
        Err(payload) => Err(panic_to_error(payload.as_ref())),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use pretty_assertions::assert_eq;
    use tokio_test::block_on;

    use super::*;
    use crate::{
        ErrorKind,
        outcome::{OutcomeExt, failure, success},
    };

    fn not_found() -> DomainError {
        DomainError::not_found("Test.NotFound", "見つかりません")
    }

    #[test]
    fn test_map_asyncは成功値を変換する() {
        let outcome = block_on(success(20).map_async(|v| async move { v + 1 }));

        assert_eq!(outcome, Ok(21));
    }

    #[test]
    fn test_map_asyncは失敗時に関数を呼ばない() {
        let calls = AtomicUsize::new(0);
        let outcome: Outcome<i32> = failure(not_found());

        let mapped = block_on(outcome.map_async(|v| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { v * 2 }
        }));

        assert_eq!(mapped, Err(not_found()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_bind_asyncは最初の失敗で後続を止める() {
        let calls = AtomicUsize::new(0);

        let outcome = block_on(async {
            success(1)
                .bind_async(|_| async { failure::<i32>(not_found()) })
                .await
                .bind_async(|v| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move { success(v) }
                })
                .await
        });

        assert_eq!(outcome, Err(not_found()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_連鎖は前段の完了後に次段を始める() {
        let order = Arc::new(Mutex::new(Vec::new()));

        let outcome = block_on(async {
            let first = Arc::clone(&order);
            let second = Arc::clone(&order);
            success(())
                .bind_async(move |()| async move {
                    tokio::task::yield_now().await;
                    first.lock().unwrap().push("first");
                    success(())
                })
                .await
                .bind_async(move |()| async move {
                    second.lock().unwrap().push("second");
                    success(())
                })
                .await
        });

        assert!(outcome.is_success());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn test_tap_asyncは副作用の完了後に元の値を返す() {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);

        let outcome = block_on(success("laptop".to_string()).tap_async(move |name| {
            let name = name.clone();
            async move { sink.lock().unwrap().push(name) }
        }));

        assert_eq!(outcome, Ok("laptop".to_string()));
        assert_eq!(*saved.lock().unwrap(), vec!["laptop".to_string()]);
    }

    #[test]
    fn test_tap_asyncは失敗時に呼ばれない() {
        let calls = AtomicUsize::new(0);
        let outcome: Outcome<i32> = failure(not_found());

        let tapped = block_on(outcome.tap_async(|_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {}
        }));

        assert_eq!(tapped, Err(not_found()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fold_asyncは一方のハンドラだけを実行する() {
        let failures = AtomicUsize::new(0);

        let rendered = block_on(success(3).fold_async(
            |v| async move { format!("ok:{v}") },
            |_| {
                failures.fetch_add(1, Ordering::SeqCst);
                async { "ng".to_string() }
            },
        ));

        assert_eq!(rendered, "ok:3");
        assert_eq!(failures.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_fold_asyncは失敗時にエラーを渡す() {
        let outcome: Outcome<i32> = failure(not_found());

        let code = block_on(outcome.fold_async(
            |_| async { String::new() },
            |e| async move { e.code().to_string() },
        ));

        assert_eq!(code, "Test.NotFound");
    }

    #[test]
    fn test_attempt_asyncは成功を返す() {
        let outcome = block_on(attempt_async(async { Ok::<_, String>(5) }));

        assert_eq!(outcome, Ok(5));
    }

    #[test]
    fn test_attempt_asyncはエラーを既定のfailureにする() {
        let outcome: Outcome<i32> =
            block_on(attempt_async(async { Err::<i32, _>("接続が切れました") }));

        assert_eq!(outcome.error().kind(), ErrorKind::Failure);
        assert_eq!(outcome.error().code(), EXCEPTION_CODE);
        assert_eq!(outcome.error().description(), "接続が切れました");
    }

    #[test]
    fn test_attempt_asyncはポーリング中のpanicを捕捉する() {
        async fn explode() -> Result<i32, String> {
            tokio::task::yield_now().await;
            panic!("途中で落ちました")
        }

        let outcome: Outcome<i32> = block_on(attempt_async(explode()));

        assert_eq!(outcome.error().kind(), ErrorKind::Failure);
        assert_eq!(outcome.error().description(), "途中で落ちました");
    }

    #[test]
    fn test_attempt_async_withは指定したハンドラで変換する() {
        let outcome: Outcome<i32> = block_on(attempt_async_with(
            async { Err::<i32, _>("timeout") },
            |e| DomainError::conflict("Test.Timeout", e),
        ));

        assert_eq!(
            outcome,
            Err(DomainError::conflict("Test.Timeout", "timeout"))
        );
    }
}
