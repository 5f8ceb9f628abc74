//! # リクエストの取り込み
//!
//! axum の抽出失敗（不正な JSON、パスパラメータの型不一致）を
//! `Validation` の処理結果に変換する。
//!
//! ハンドラは抽出子を `Result<Json<T>, JsonRejection>` のように受け取り、
//! ここを通してから処理結果の連鎖に乗せる。こうすることで 4xx は
//! すべて Problem Details になる。

use axum::{
   Json,
   extract::{
      Path,
      rejection::{JsonRejection, PathRejection},
   },
};
use kekka_domain::{DomainError, Outcome, outcome::attempt_with};

pub const INVALID_BODY_CODE: &str = "Request.InvalidBody";
pub const INVALID_PATH_CODE: &str = "Request.InvalidPath";

/// JSON 本文を取り込む
pub fn body<T>(extracted: Result<Json<T>, JsonRejection>) -> Outcome<T> {
   attempt_with(
      || extracted.map(|Json(value)| value),
      |rejection| DomainError::validation(INVALID_BODY_CODE, rejection.body_text()),
   )
}

/// パスパラメータを取り込む
pub fn path<T>(extracted: Result<Path<T>, PathRejection>) -> Outcome<T> {
   attempt_with(
      || extracted.map(|Path(value)| value),
      |rejection| DomainError::validation(INVALID_PATH_CODE, rejection.body_text()),
   )
}
