//! # UserRepository
//!
//! ユーザーの保存と検索を担当するリポジトリ。

use async_trait::async_trait;
use kekka_domain::user::{Email, User, UserId};

use crate::memory::MemoryTable;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// 新しいユーザー ID を払い出す
   async fn next_id(&self) -> UserId;

   /// 全ユーザーを登録順に取得
   async fn find_all(&self) -> Vec<User>;

   async fn find_by_id(&self, id: UserId) -> Option<User>;

   /// メールアドレスでユーザーを検索
   ///
   /// 保存されているメールアドレスは正規化済みなので、完全一致で比較する。
   async fn find_by_email(&self, email: &Email) -> Option<User>;

   /// ユーザーを保存（同じ ID があれば置き換え）
   async fn save(&self, user: User);

   /// ユーザーを削除
   ///
   /// # 戻り値
   ///
   /// - `true`: 削除した場合
   /// - `false`: 該当するユーザーがいなかった場合
   async fn delete(&self, id: UserId) -> bool;
}

/// インメモリ実装の UserRepository
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
   users: MemoryTable<User>,
}

impl InMemoryUserRepository {
   pub fn new() -> Self {
      Self::default()
   }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
   async fn next_id(&self) -> UserId {
      UserId::new(self.users.next_id())
   }

   async fn find_all(&self) -> Vec<User> {
      self.users.all()
   }

   async fn find_by_id(&self, id: UserId) -> Option<User> {
      self.users.find(|u| u.id() == id)
   }

   async fn find_by_email(&self, email: &Email) -> Option<User> {
      self.users.find(|u| u.email() == email)
   }

   async fn save(&self, user: User) {
      let id = user.id();
      self.users.upsert(user, |u| u.id() == id);
   }

   async fn delete(&self, id: UserId) -> bool {
      self.users.remove(|u| u.id() == id)
   }
}
