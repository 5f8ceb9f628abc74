//! # 失敗の HTTP 表現
//!
//! ドメインエラーを RFC 9457 Problem Details のレスポンスに射影する。
//!
//! ## 設計方針
//!
//! - **種別だけで決める**: ステータス・`title`・`type` は [`ErrorKind`] から一意に決まる
//! - **説明とコードはそのまま**: `detail` はエラーの説明、`code` はエラーコード
//! - **内部情報は載せない**: スタックトレースや panic の位置は本文に含めない
//!
//! ## エラー種別と HTTP ステータスの対応
//!
//! | ErrorKind | HTTP Status | title |
//! |-----------|-------------|-------|
//! | NotFound | 404 | Not Found |
//! | Validation | 400 | Validation Error |
//! | Conflict | 409 | Conflict |
//! | Unauthorized | 401 | Unauthorized |
//! | Forbidden | 403 | Forbidden |
//! | Failure | 400 | Bad Request |

use axum::{
   Json,
   http::{StatusCode, header},
   response::{IntoResponse, Response},
};
use kekka_domain::{DomainError, ErrorKind, outcome::EXCEPTION_CODE};
use kekka_shared::{ErrorResponse, error_response::PROBLEM_JSON_CONTENT_TYPE};

/// HTTP レスポンスに変換できるドメインエラー
///
/// ハンドラは `Result<_, Problem>` を返し、`Outcome` に `?` を使える。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem(pub DomainError);

impl From<DomainError> for Problem {
   fn from(error: DomainError) -> Self {
      Self(error)
   }
}

impl Problem {
   /// Problem Details 本文とステータスコードを組み立てる
   pub fn document(&self) -> (StatusCode, ErrorResponse) {
      debug_assert!(
         !self.0.is_none(),
         "エラーなしの番兵値がレスポンスに到達しました"
      );

      if self.0.is_none() {
         let body = ErrorResponse::bad_request("処理に失敗しました").with_code(EXCEPTION_CODE);
         return (StatusCode::BAD_REQUEST, body);
      }

      let detail = self.0.description();
      let (status, body) = match self.0.kind() {
         ErrorKind::NotFound => (StatusCode::NOT_FOUND, ErrorResponse::not_found(detail)),
         ErrorKind::Validation => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::validation_error(detail),
         ),
         ErrorKind::Conflict => (StatusCode::CONFLICT, ErrorResponse::conflict(detail)),
         ErrorKind::Unauthorized => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::unauthorized(detail),
         ),
         ErrorKind::Forbidden => (StatusCode::FORBIDDEN, ErrorResponse::forbidden(detail)),
         ErrorKind::Failure => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(detail)),
      };

      (status, body.with_code(self.0.code()))
   }
}

impl IntoResponse for Problem {
   fn into_response(self) -> Response {
      let (status, body) = self.document();

      if self.0.kind() == ErrorKind::Failure {
         tracing::error!(code = self.0.code(), "{}", self.0.description());
      }

      (
         status,
         [(header::CONTENT_TYPE, PROBLEM_JSON_CONTENT_TYPE)],
         Json(body),
      )
         .into_response()
   }
}
