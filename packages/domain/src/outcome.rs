//! # 処理結果（Outcome）
//!
//! 成功（値あり / 値なし）か、型付きのエラーによる失敗かを表す処理結果型と、
//! その合成のためのコンビネータを提供する。
//!
//! ## 設計方針
//!
//! - **和型で表す**: [`Outcome<T>`] は `Result<T, DomainError>` の別名。
//!   成功と失敗はどちらか一方しか成立しないことを型が保証する
//! - **値なしの成功**: `Outcome<()>`（既定の型引数）で表す
//! - **例外を使わない**: 失敗は値として流れ、最初の失敗で後続の処理は実行されない
//! - **失敗時の値アクセスは即座に落ちる**: [`OutcomeExt::value`] は失敗に対して
//!   既定値を返さず panic する。通常の制御フローでは `?` かコンビネータを使う
//!
//! ## 操作の対応表
//!
//! | 操作 | Rust での表現 |
//! |------|---------------|
//! | Success / Failure | [`success`] / [`failure`] |
//! | Option からの変換 | [`from_option`] |
//! | IsSuccess / IsFailure | [`OutcomeExt::is_success`] / [`OutcomeExt::is_failure`] |
//! | Value / Error | [`OutcomeExt::value`] / [`OutcomeExt::error`] |
//! | Map / Bind | `Result::map` / [`OutcomeExt::bind`]（`Result::and_then`） |
//! | Tap / TapError | [`OutcomeExt::tap`] / [`OutcomeExt::tap_error`] |
//! | Ensure | [`OutcomeExt::ensure`] / [`OutcomeExt::ensure_with`] |
//! | Match | [`OutcomeExt::fold`] |
//! | Combine | [`combine`] |
//! | Try | [`attempt`] / [`attempt_with`] |
//!
//! 非同期版は [`future`] モジュールにある。
//!
//! ## 使用例
//!
//! ```rust
//! use kekka_domain::{
//!     DomainError,
//!     outcome::{Outcome, OutcomeExt, success},
//! };
//!
//! fn parse_quantity(raw: i32) -> Outcome<i32> {
//!     success(raw).ensure(
//!         |q| *q > 0,
//!         DomainError::validation("Order.InvalidQuantity", "数量は 1 以上です"),
//!     )
//! }
//!
//! let doubled = parse_quantity(3).map(|q| q * 2);
//! assert_eq!(doubled.value(), 6);
//! assert!(parse_quantity(0).is_failure());
//! ```

pub mod future;

use std::{
    any::Any,
    fmt::Display,
    panic::{self, AssertUnwindSafe},
};

use crate::DomainError;

/// 処理結果
///
/// 型引数を省略すると値を持たない処理結果（`Outcome<()>`）になる。
pub type Outcome<T = ()> = Result<T, DomainError>;

/// 捕捉した例外的な失敗に付けるコード
pub const EXCEPTION_CODE: &str = "Error.Exception";

/// 成功側で `error()` が返す番兵値
static NO_ERROR: DomainError = DomainError::none();

/// 成功した処理結果を作る
pub fn success<T>(value: T) -> Outcome<T> {
    Ok(value)
}

/// 失敗した処理結果を作る
///
/// # パニック
///
/// 番兵値 [`DomainError::none`] を渡した場合は契約違反として panic する。
#[track_caller]
pub fn failure<T>(error: DomainError) -> Outcome<T> {
    assert!(
        !error.is_none(),
        "エラーなしの番兵値で失敗した処理結果は作れません"
    );
    Err(error)
}

/// `Option` を処理結果に変換する
///
/// `None` は成功にも panic にもならず、[`DomainError::null_value`] の失敗になる。
pub fn from_option<T>(value: Option<T>) -> Outcome<T> {
    value.ok_or_else(DomainError::null_value)
}

/// 2 つの処理結果を組にする
///
/// 両方とも成功した場合だけ成功になる。両方失敗している場合は
/// 第 1 引数のエラーを返す。
pub fn combine<A, B>(first: Outcome<A>, second: Outcome<B>) -> Outcome<(A, B)> {
    match (first, second) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), _) | (Ok(_), Err(e)) => Err(e),
    }
}

/// 失敗しうる外部処理を実行し、その失敗を処理結果に取り込む
///
/// `Err(e)` は `e` の表示文字列を説明に持つ `Failure` に、panic は panic
/// メッセージを説明に持つ `Failure` に変換する。どちらも呼び出し元へは伝播しない。
pub fn attempt<T, E, F>(operation: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Display,
{
    attempt_with(operation, |e| {
        DomainError::failure(EXCEPTION_CODE, e.to_string())
    })
}

/// [`attempt`] のエラー変換を呼び出し元が指定する版
///
/// `handler` は `Err(e)` にだけ適用される。panic は常に既定の `Failure` になる。
pub fn attempt_with<T, E, F, H>(operation: F, handler: H) -> Outcome<T>
where
    F: FnOnce() -> Result<T, E>,
    H: FnOnce(E) -> DomainError,
{
    match panic::catch_unwind(AssertUnwindSafe(operation)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(handler(error)),
        Err(payload) => Err(panic_to_error(payload.as_ref())),
    }
}

pub(crate) fn panic_to_error(payload: &(dyn Any + Send)) -> DomainError {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "不明なエラーが発生しました".to_string());
    DomainError::failure(EXCEPTION_CODE, message)
}

/// 処理結果の拡張メソッド
///
/// `map` / `and_then` / `is_ok` など標準の `Result` のメソッドはそのまま使える。
/// ここでは標準にない操作だけを追加する。
pub trait OutcomeExt<T>: Sized {
    fn is_success(&self) -> bool;

    fn is_failure(&self) -> bool;

    /// 成功値を取り出す
    ///
    /// # パニック
    ///
    /// 失敗している場合は `ValueAccessOnFailure` としてエラーコードと説明を含めて
    /// panic する。事前に状態を確認するか、コンビネータを使うこと。
    fn value(self) -> T;

    /// 成功値への参照を取り出す（panic 条件は [`value`](OutcomeExt::value) と同じ）
    fn value_ref(&self) -> &T;

    /// 失敗のエラーを返す。成功している場合は番兵値を返す
    fn error(&self) -> &DomainError;

    /// 成功値を受け取り、次の処理結果をそのまま返す（`and_then` と同じ）
    fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>;

    /// 成功時だけ副作用を実行し、処理結果は変えずに返す
    ///
    /// `f` の戻り値は捨てられる。
    fn tap<R, F>(self, f: F) -> Self
    where
        F: FnOnce(&T) -> R;

    /// 失敗時だけ副作用を実行し、処理結果は変えずに返す
    fn tap_error<R, F>(self, f: F) -> Self
    where
        F: FnOnce(&DomainError) -> R;

    /// 成功値が条件を満たさなければ `error` の失敗にする
    ///
    /// 既に失敗している場合は条件を評価しない。
    fn ensure<P>(self, predicate: P, error: DomainError) -> Self
    where
        P: FnOnce(&T) -> bool;

    /// [`ensure`](OutcomeExt::ensure) のエラーを成功値から組み立てる版
    fn ensure_with<P, E>(self, predicate: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> DomainError;

    /// 成功・失敗のどちらか一方のハンドラだけを実行し、その戻り値を返す
    fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(DomainError) -> R;
}

impl<T> OutcomeExt<T> for Outcome<T> {
    fn is_success(&self) -> bool {
        self.is_ok()
    }

    fn is_failure(&self) -> bool {
        self.is_err()
    }

    #[track_caller]
    fn value(self) -> T {
        match self {
            Ok(value) => value,
            Err(error) => value_access_on_failure(&error),
        }
    }

    #[track_caller]
    fn value_ref(&self) -> &T {
        match self {
            Ok(value) => value,
            Err(error) => value_access_on_failure(error),
        }
    }

    fn error(&self) -> &DomainError {
        match self {
            Ok(_) => &NO_ERROR,
            Err(error) => error,
        }
    }

    fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        self.and_then(f)
    }

    fn tap<R, F>(self, f: F) -> Self
    where
        F: FnOnce(&T) -> R,
    {
        if let Ok(value) = &self {
            f(value);
        }
        self
    }

    fn tap_error<R, F>(self, f: F) -> Self
    where
        F: FnOnce(&DomainError) -> R,
    {
        if let Err(error) = &self {
            f(error);
        }
        self
    }

    fn ensure<P>(self, predicate: P, error: DomainError) -> Self
    where
        P: FnOnce(&T) -> bool,
    {
        self.ensure_with(predicate, |_| error)
    }

    fn ensure_with<P, E>(self, predicate: P, error: E) -> Self
    where
        P: FnOnce(&T) -> bool,
        E: FnOnce(&T) -> DomainError,
    {
        match self {
            Ok(value) if !predicate(&value) => Err(error(&value)),
            other => other,
        }
    }

    fn fold<R, S, F>(self, on_success: S, on_failure: F) -> R
    where
        S: FnOnce(T) -> R,
        F: FnOnce(DomainError) -> R,
    {
        match self {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }
}

#[track_caller]
fn value_access_on_failure(error: &DomainError) -> ! {
    panic!(
        "ValueAccessOnFailure: {}: {}",
        error.code(),
        error.description()
    )
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::ErrorKind;

    fn e1() -> DomainError {
        DomainError::validation("Test.First", "1 つ目のエラー")
    }

    fn e2() -> DomainError {
        DomainError::conflict("Test.Second", "2 つ目のエラー")
    }

    // ===== 生成と状態 =====

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(-7)]
    fn test_successは成功しvalueで同じ値を返す(#[case] v: i32) {
        let outcome = success(v);

        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.value(), v);
    }

    #[test]
    fn test_値なしの成功を表せる() {
        let outcome: Outcome = success(());

        assert!(outcome.is_success());
        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_failureは失敗しエラーを保持する() {
        let outcome: Outcome<i32> = failure(e1());

        assert!(outcome.is_failure());
        assert_eq!(outcome.error(), &e1());
    }

    #[test]
    #[should_panic(expected = "ValueAccessOnFailure: Test.First: 1 つ目のエラー")]
    fn test_失敗に対するvalueはエラー情報付きでpanicする() {
        let outcome: Outcome<i32> = failure(e1());
        let _ = outcome.value();
    }

    #[test]
    #[should_panic(expected = "ValueAccessOnFailure")]
    fn test_失敗に対するvalue_refもpanicする() {
        let outcome: Outcome<String> = failure(e2());
        let _ = outcome.value_ref();
    }

    #[test]
    #[should_panic(expected = "番兵値")]
    fn test_番兵値でfailureを作るとpanicする() {
        let _: Outcome<i32> = failure(DomainError::none());
    }

    #[test]
    fn test_コードも説明も空の失敗は番兵値と区別される() {
        // Given: 空のコードと説明で作った実エラー
        let error = DomainError::failure("", "");

        // When
        let outcome: Outcome<i32> = failure(error.clone());

        // Then: panic せず失敗として保持される
        assert!(outcome.is_err());
        assert_eq!(outcome.error(), &error);
        assert!(!outcome.error().is_none());
    }

    #[test]
    fn test_成功に対するerrorは番兵値を返す() {
        let outcome = success("ok");

        assert!(outcome.error().is_none());
    }

    #[test]
    fn test_from_optionでsomeは成功になる() {
        assert_eq!(from_option(Some(3)).value(), 3);
    }

    #[test]
    fn test_from_optionでnoneはnull_valueの失敗になる() {
        let outcome = from_option::<i32>(None);

        assert_eq!(outcome.error(), &DomainError::null_value());
        assert_eq!(outcome.error().code(), "Error.NullValue");
    }

    // ===== Map / Bind =====

    #[test]
    fn test_mapは失敗を変えずに関数も呼ばない() {
        let called = Cell::new(false);
        let outcome: Outcome<i32> = failure(e1());

        let mapped = outcome.map(|v| {
            called.set(true);
            v.to_string()
        });

        assert_eq!(mapped, Err(e1()));
        assert!(!called.get());
    }

    #[test]
    fn test_mapは成功値の型を変えられる() {
        let mapped = success(21).map(|v| format!("{}", v * 2));

        assert_eq!(mapped.value(), "42");
    }

    #[test]
    fn test_bindで関数が失敗を返すとその失敗になる() {
        let outcome = success(1).bind(|_| failure::<i32>(e2()));

        assert_eq!(outcome, Err(e2()));
    }

    #[test]
    fn test_bindは失敗時に関数を呼ばずエラーの同一性を保つ() {
        let called = Cell::new(0);
        let outcome: Outcome<i32> = failure(e1());

        let chained = outcome
            .bind(|v| {
                called.set(called.get() + 1);
                success(v + 1)
            })
            .bind(|v| {
                called.set(called.get() + 1);
                success(v.to_string())
            })
            .bind(|s| {
                called.set(called.get() + 1);
                success(s.len())
            });

        assert_eq!(called.get(), 0);
        let error = chained.error();
        assert_eq!(error.kind(), ErrorKind::Validation);
        assert_eq!(error.code(), "Test.First");
        assert_eq!(error.description(), "1 つ目のエラー");
    }

    #[test]
    fn test_bindは最初の失敗で後続を止める() {
        let steps = Cell::new(0);

        let outcome = success(10)
            .bind(|v| {
                steps.set(steps.get() + 1);
                success(v * 2)
            })
            .bind(|_| {
                steps.set(steps.get() + 1);
                failure::<i32>(e2())
            })
            .bind(|v| {
                steps.set(steps.get() + 1);
                success(v)
            });

        assert_eq!(steps.get(), 2);
        assert_eq!(outcome, Err(e2()));
    }

    // ===== Tap / TapError =====

    #[test]
    fn test_tapは成功時に1回だけ呼ばれる() {
        let counter = Cell::new(0);

        let outcome = success(5).tap(|_| counter.set(counter.get() + 1));

        assert_eq!(counter.get(), 1);
        assert_eq!(outcome.value(), 5);
    }

    #[test]
    fn test_tapは失敗時に呼ばれない() {
        let counter = Cell::new(0);
        let outcome: Outcome<i32> = failure(e1());

        let tapped = outcome.tap(|_| counter.set(counter.get() + 1));

        assert_eq!(counter.get(), 0);
        assert_eq!(tapped, Err(e1()));
    }

    #[test]
    fn test_tapの戻り値は捨てられる() {
        let mut seen = Vec::new();

        let outcome = success(3).tap(|v| {
            seen.push(*v);
            "ignored"
        });

        assert_eq!(outcome, Ok(3));
        assert_eq!(seen, vec![3]);
    }

    #[test]
    fn test_tap_errorは失敗時だけ呼ばれる() {
        let logged = Cell::new(0);

        let ok = success(1).tap_error(|_| logged.set(logged.get() + 1));
        let err: Outcome<i32> = failure::<i32>(e1()).tap_error(|_| logged.set(logged.get() + 1));

        assert_eq!(logged.get(), 1);
        assert_eq!(ok, Ok(1));
        assert_eq!(err, Err(e1()));
    }

    // ===== Ensure =====

    #[test]
    fn test_ensureで条件を満たせば成功のまま() {
        assert_eq!(success(5).ensure(|x| *x > 0, e1()), Ok(5));
    }

    #[test]
    fn test_ensureで条件を満たさなければ指定エラーになる() {
        assert_eq!(success(-1).ensure(|x| *x > 0, e1()), Err(e1()));
    }

    #[test]
    fn test_ensureは失敗時に条件を評価しない() {
        let evaluated = Cell::new(false);
        let outcome: Outcome<i32> = failure(e2());

        let ensured = outcome.ensure(
            |_| {
                evaluated.set(true);
                false
            },
            e1(),
        );

        assert!(!evaluated.get());
        assert_eq!(ensured, Err(e2()));
    }

    #[test]
    fn test_ensure_withは成功値からエラーを組み立てる() {
        let outcome = success(7).ensure_with(
            |x| *x < 5,
            |x| DomainError::validation("Test.TooLarge", format!("{x} は大きすぎます")),
        );

        assert_eq!(outcome.error().description(), "7 は大きすぎます");
    }

    // ===== Combine =====

    #[test]
    fn test_combineは両方成功なら組を返す() {
        assert_eq!(combine(success(1), success("a")), Ok((1, "a")));
    }

    #[test]
    fn test_combineは両方失敗なら第1引数のエラーを返す() {
        let outcome = combine::<i32, i32>(failure(e1()), failure(e2()));

        assert_eq!(outcome, Err(e1()));
    }

    #[test]
    fn test_combineは第2引数だけ失敗ならそのエラーを返す() {
        let outcome = combine::<i32, i32>(success(1), failure(e2()));

        assert_eq!(outcome, Err(e2()));
    }

    // ===== Match =====

    #[test]
    fn test_foldは成功時に成功ハンドラだけを実行する() {
        let failures = Cell::new(0);

        let rendered = success(2).fold(
            |v| format!("ok:{v}"),
            |_| {
                failures.set(failures.get() + 1);
                "ng".to_string()
            },
        );

        assert_eq!(rendered, "ok:2");
        assert_eq!(failures.get(), 0);
    }

    #[test]
    fn test_foldは失敗時に失敗ハンドラだけを実行する() {
        let outcome: Outcome<i32> = failure(e2());

        let rendered = outcome.fold(|_| unreachable!(), |e| e.code().to_string());

        assert_eq!(rendered, "Test.Second");
    }

    // ===== Try =====

    #[test]
    fn test_attemptは成功をそのまま返す() {
        let outcome = attempt(|| "12".parse::<i32>());

        assert_eq!(outcome, Ok(12));
    }

    #[test]
    fn test_attemptはエラーを既定のfailureに変換する() {
        let outcome = attempt(|| "abc".parse::<i32>());

        let error = outcome.error();
        assert_eq!(error.kind(), ErrorKind::Failure);
        assert_eq!(error.code(), EXCEPTION_CODE);
        assert_eq!(error.description(), "invalid digit found in string");
    }

    #[test]
    fn test_attempt_withは指定したハンドラでエラーを変換する() {
        let outcome = attempt_with(
            || "abc".parse::<i32>(),
            |_| DomainError::validation("Test.NotANumber", "数値ではありません"),
        );

        assert_eq!(
            outcome,
            Err(DomainError::validation("Test.NotANumber", "数値ではありません"))
        );
    }

    #[test]
    fn test_attemptはpanicを捕捉してfailureにする() {
        let outcome: Outcome<i32> = attempt(|| -> Result<i32, String> { panic!("壊れました") });

        assert_eq!(outcome.error().kind(), ErrorKind::Failure);
        assert_eq!(outcome.error().description(), "壊れました");
    }

    #[test]
    fn test_attemptはフォーマット付きpanicのメッセージも取り出す() {
        let outcome: Outcome<i32> =
            attempt(|| -> Result<i32, String> { panic!("在庫 {} 件", 3) });

        assert_eq!(outcome.error().description(), "在庫 3 件");
    }
}
