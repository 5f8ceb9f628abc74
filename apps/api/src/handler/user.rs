//! # ユーザーハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /users` - ユーザー一覧
//! - `POST /users` - ユーザー登録
//! - `GET /users/{id}` - ユーザー詳細
//! - `PUT /users/{id}` - ユーザー更新
//! - `DELETE /users/{id}` - ユーザー削除

use std::sync::Arc;

use axum::{
   Json,
   extract::{
      Path,
      State,
      rejection::{JsonRejection, PathRejection},
   },
   response::Response,
};
use futures_util::TryFutureExt;
use kekka_domain::{
   AsyncOutcomeExt,
   OutcomeExt,
   outcome::combine,
   user::{User, UserId},
};
use serde::{Deserialize, Serialize};

use crate::{
   request,
   response,
   usecase::{UserInput, UserUseCaseImpl},
};

/// ユーザー API の共有状態
pub struct UserState {
   pub usecase: UserUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
   pub id:         UserId,
   pub name:       String,
   pub email:      String,
   pub created_at: String,
}

impl From<User> for UserDto {
   fn from(user: User) -> Self {
      Self {
         id:         user.id(),
         name:       user.name().to_string(),
         email:      user.email().to_string(),
         created_at: user.created_at().to_rfc3339(),
      }
   }
}

/// ユーザー登録・更新リクエスト
///
/// 欠けた項目は空文字列として扱い、検証エラーで報告する。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserRequest {
   pub name:  String,
   pub email: String,
}

impl From<UserRequest> for UserInput {
   fn from(request: UserRequest) -> Self {
      Self {
         name:  request.name,
         email: request.email,
      }
   }
}

// --- ハンドラ ---

/// GET /users
#[tracing::instrument(skip_all)]
pub async fn list_users(State(state): State<Arc<UserState>>) -> Response {
   let outcome = state
      .usecase
      .list_users()
      .map_ok(|users| users.into_iter().map(UserDto::from).collect::<Vec<_>>())
      .await;

   response::ok(outcome)
}

/// GET /users/{id}
#[tracing::instrument(skip_all, fields(user_id))]
pub async fn get_user(
   State(state): State<Arc<UserState>>,
   id: Result<Path<UserId>, PathRejection>,
) -> Response {
   let outcome = request::path(id)
      .tap(record_user_id)
      .bind_async(|id| state.usecase.get_user(id))
      .await
      .map(UserDto::from);

   response::ok(outcome)
}

/// POST /users
///
/// ## レスポンス
///
/// - `201 Created`: 登録したユーザー（`Location: /users/{id}`）
/// - `400 Bad Request`: 名前・メールアドレスの検証エラー、不正な JSON
/// - `409 Conflict`: メールアドレスが使用済み
#[tracing::instrument(skip_all)]
pub async fn create_user(
   State(state): State<Arc<UserState>>,
   payload: Result<Json<UserRequest>, JsonRejection>,
) -> Response {
   let outcome = request::body(payload)
      .bind_async(|request| state.usecase.create_user(request.into()))
      .await
      .map(UserDto::from);

   response::created(outcome, |user| format!("/users/{}", user.id))
}

/// PUT /users/{id}
///
/// パスとリクエストの両方が不正な場合はパスのエラーを返す。
#[tracing::instrument(skip_all, fields(user_id))]
pub async fn update_user(
   State(state): State<Arc<UserState>>,
   id: Result<Path<UserId>, PathRejection>,
   payload: Result<Json<UserRequest>, JsonRejection>,
) -> Response {
   let outcome = combine(request::path(id).tap(record_user_id), request::body(payload))
      .bind_async(|(id, request)| state.usecase.update_user(id, request.into()))
      .await
      .map(UserDto::from);

   response::ok(outcome)
}

/// DELETE /users/{id}
#[tracing::instrument(skip_all, fields(user_id))]
pub async fn delete_user(
   State(state): State<Arc<UserState>>,
   id: Result<Path<UserId>, PathRejection>,
) -> Response {
   let outcome = request::path(id)
      .tap(record_user_id)
      .bind_async(|id| state.usecase.delete_user(id))
      .await;

   response::no_content(outcome)
}

fn record_user_id(id: &UserId) {
   tracing::Span::current().record("user_id", id.as_u64());
}
