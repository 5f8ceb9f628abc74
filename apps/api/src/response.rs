//! # 成功の HTTP 表現
//!
//! 処理結果を HTTP レスポンスに射影する。成功・失敗のどちらか一方だけが
//! レスポンスになり、失敗は [`Problem`] として描画される。
//!
//! | 関数 | 成功時 |
//! |------|--------|
//! | [`ok`] | 200 `{ "data": T }` |
//! | [`created`] | 201 `{ "data": T }` + `Location` |
//! | [`no_content`] | 204（本文なし） |

use axum::{
   Json,
   http::{StatusCode, header},
   response::{IntoResponse, Response},
};
use kekka_domain::{Outcome, OutcomeExt};
use kekka_shared::ApiResponse;
use serde::Serialize;

use crate::error::Problem;

fn problem(error: kekka_domain::DomainError) -> Response {
   Problem(error).into_response()
}

/// 200 OK
pub fn ok<T: Serialize>(outcome: Outcome<T>) -> Response {
   outcome.fold(
      |value| (StatusCode::OK, Json(ApiResponse::new(value))).into_response(),
      problem,
   )
}

/// 201 Created
///
/// `location` は作成したリソースの URI を成功値から組み立てる。
pub fn created<T, L>(outcome: Outcome<T>, location: L) -> Response
where
   T: Serialize,
   L: FnOnce(&T) -> String,
{
   outcome.fold(
      |value| {
         let location = location(&value);
         (
            StatusCode::CREATED,
            [(header::LOCATION, location)],
            Json(ApiResponse::new(value)),
         )
            .into_response()
      },
      problem,
   )
}

/// 204 No Content
pub fn no_content(outcome: Outcome) -> Response {
   outcome.fold(|()| StatusCode::NO_CONTENT.into_response(), problem)
}
