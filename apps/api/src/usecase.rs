//! # ユースケース層
//!
//! ユーザー・商品・注文の操作を処理結果の連鎖として実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと時刻を `Arc<dyn Trait>` で外部から注入
//! - **失敗は値で返す**: すべての操作は `Outcome` を返し、`?` や panic で抜けない
//! - **ログは連鎖の中で**: 成功は `tap`、失敗は `tap_error` で記録する
//!
//! ## モジュール構成
//!
//! - `user`: ユーザーの登録・更新・削除
//! - `product`: 商品の登録・更新・削除
//! - `order`: 注文の作成（在庫の引き当て）とキャンセル

pub mod order;
pub mod product;
pub mod user;

use kekka_domain::{DomainError, ErrorKind};
pub use order::{CreateOrderInput, OrderLineInput, OrderUseCaseImpl};
pub use product::{ProductInput, ProductUseCaseImpl};
pub use user::{UserInput, UserUseCaseImpl};

/// 失敗を記録する `tap_error` 用のハンドラを作る
///
/// 業務上の失敗は `warn`、分類されない失敗は `error` で出力する。
pub(crate) fn log_failure(operation: &'static str) -> impl Fn(&DomainError) {
   move |error| match error.kind() {
      ErrorKind::Failure => tracing::error!(
         operation,
         error.code = error.code(),
         "{}",
         error.description()
      ),
      kind => tracing::warn!(
         operation,
         error.kind = %kind,
         error.code = error.code(),
         "{}",
         error.description()
      ),
   }
}
