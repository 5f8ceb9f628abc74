//! ユーザー管理ユースケース

use std::sync::Arc;

use kekka_domain::{
   AsyncOutcomeExt,
   Outcome,
   OutcomeExt,
   clock::Clock,
   outcome::{combine, success},
   user::{Email, User, UserErrors, UserId, UserName},
};
use kekka_infra::repository::UserRepository;

use super::log_failure;

/// ユーザー登録・更新の入力（未検証）
pub struct UserInput {
   pub name:  String,
   pub email: String,
}

impl UserInput {
   /// 名前とメールアドレスを検証する
   ///
   /// 両方とも不正な場合は名前のエラーを返す。
   fn validate(&self) -> Outcome<(UserName, Email)> {
      combine(UserName::new(&self.name), Email::new(&self.email))
   }
}

/// ユーザー管理ユースケース
pub struct UserUseCaseImpl {
   user_repository: Arc<dyn UserRepository>,
   clock:           Arc<dyn Clock>,
}

impl UserUseCaseImpl {
   pub fn new(user_repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         user_repository,
         clock,
      }
   }

   pub async fn list_users(&self) -> Outcome<Vec<User>> {
      success(self.user_repository.find_all().await)
   }

   pub async fn get_user(&self, id: UserId) -> Outcome<User> {
      self
         .user_repository
         .find_by_id(id)
         .await
         .ok_or_else(|| UserErrors::not_found(id))
   }

   /// ユーザーを登録する
   ///
   /// 1. 名前・メールアドレスを検証
   /// 2. メールアドレスが未使用であることを確認
   /// 3. 採番して保存
   pub async fn create_user(&self, input: UserInput) -> Outcome<User> {
      input
         .validate()
         .bind_async(|(name, email)| async move {
            self
               .ensure_email_available(&email, None)
               .await
               .map(|()| (name, email))
         })
         .await
         .bind_async(|(name, email)| async move {
            let id = self.user_repository.next_id().await;
            success(User::new(id, name, email, self.clock.now()))
         })
         .await
         .tap_async(|user| self.user_repository.save(user.clone()))
         .await
         .tap(|user| tracing::info!(user_id = %user.id(), "ユーザーを登録しました"))
         .tap_error(log_failure("create_user"))
   }

   /// ユーザーを更新する
   ///
   /// メールアドレスの重複確認では更新対象のユーザー自身を除外する。
   pub async fn update_user(&self, id: UserId, input: UserInput) -> Outcome<User> {
      self
         .get_user(id)
         .await
         .bind(|user| input.validate().map(|profile| (user, profile)))
         .bind_async(|(user, (name, email))| async move {
            self
               .ensure_email_available(&email, Some(user.id()))
               .await
               .map(|()| user.with_profile(name, email))
         })
         .await
         .tap_async(|user| self.user_repository.save(user.clone()))
         .await
         .tap(|user| tracing::info!(user_id = %user.id(), "ユーザーを更新しました"))
         .tap_error(log_failure("update_user"))
   }

   pub async fn delete_user(&self, id: UserId) -> Outcome {
      success(self.user_repository.delete(id).await)
         .ensure(|deleted| *deleted, UserErrors::not_found(id))
         .map(|_| ())
         .tap(|_| tracing::info!(user_id = %id, "ユーザーを削除しました"))
         .tap_error(log_failure("delete_user"))
   }

   async fn ensure_email_available(&self, email: &Email, owner: Option<UserId>) -> Outcome {
      match self.user_repository.find_by_email(email).await {
         Some(existing) if Some(existing.id()) != owner => Err(UserErrors::email_exists(email)),
         _ => Ok(()),
      }
   }
}
