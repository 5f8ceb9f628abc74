//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! 失敗した処理結果を表す機械可読なドキュメント。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換は api クレートの責務（shared に axum 依存を入れない）
//! - エラー種別ごとの便利コンストラクタで `type` URI と `title` を固定する
//! - ドメインエラーのコードは本文に埋め込まず、拡張メンバー `code` に載せる

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://kekka.example.com/errors";

/// Problem Details の Content-Type
pub const PROBLEM_JSON_CONTENT_TYPE: &str = "application/problem+json";

/// エラーレスポンス（RFC 9457 Problem Details）
///
/// `title` はエラー種別だけから決まる固定文字列で、個々のエラー内容は
/// `detail`（説明）と `code`（安定した識別子）で表す。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
   #[serde(rename = "type")]
   pub error_type: String,
   pub title:      String,
   pub status:     u16,
   pub detail:     String,
   /// ドメインエラーコード（例: `"User.EmailExists"`）
   #[serde(default, skip_serializing_if = "Option::is_none")]
   pub code:       Option<String>,
}

impl ErrorResponse {
   /// 汎用コンストラクタ
   ///
   /// `error_type_suffix` はベース URI に付加される（例: `"not-found"`）。
   pub fn new(
      error_type_suffix: &str,
      title: impl Into<String>,
      status: u16,
      detail: impl Into<String>,
   ) -> Self {
      Self {
         error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
         title: title.into(),
         status,
         detail: detail.into(),
         code: None,
      }
   }

   /// エラーコードを拡張メンバーとして付与する
   pub fn with_code(self, code: impl Into<String>) -> Self {
      Self {
         code: Some(code.into()),
         ..self
      }
   }

   /// 400 Bad Request
   pub fn bad_request(detail: impl Into<String>) -> Self {
      Self::new("bad-request", "Bad Request", 400, detail)
   }

   /// 400 Validation Error
   pub fn validation_error(detail: impl Into<String>) -> Self {
      Self::new("validation-error", "Validation Error", 400, detail)
   }

   /// 401 Unauthorized
   pub fn unauthorized(detail: impl Into<String>) -> Self {
      Self::new("unauthorized", "Unauthorized", 401, detail)
   }

   /// 403 Forbidden
   pub fn forbidden(detail: impl Into<String>) -> Self {
      Self::new("forbidden", "Forbidden", 403, detail)
   }

   /// 404 Not Found
   pub fn not_found(detail: impl Into<String>) -> Self {
      Self::new("not-found", "Not Found", 404, detail)
   }

   /// 409 Conflict
   pub fn conflict(detail: impl Into<String>) -> Self {
      Self::new("conflict", "Conflict", 409, detail)
   }
}
