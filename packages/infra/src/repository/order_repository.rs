//! # OrderRepository
//!
//! 注文の保存と検索を担当するリポジトリ。

use async_trait::async_trait;
use kekka_domain::{
   order::{Order, OrderId},
   user::UserId,
};

use crate::memory::MemoryTable;

/// 注文リポジトリトレイト
#[async_trait]
pub trait OrderRepository: Send + Sync {
   async fn next_id(&self) -> OrderId;

   async fn find_all(&self) -> Vec<Order>;

   async fn find_by_id(&self, id: OrderId) -> Option<Order>;

   /// 指定ユーザーの注文を登録順に取得
   async fn find_by_user(&self, user_id: UserId) -> Vec<Order>;

   /// 注文を保存（同じ ID があれば置き換え）
   async fn save(&self, order: Order);
}

/// インメモリ実装の OrderRepository
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
   orders: MemoryTable<Order>,
}

impl InMemoryOrderRepository {
   pub fn new() -> Self {
      Self::default()
   }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
   async fn next_id(&self) -> OrderId {
      OrderId::new(self.orders.next_id())
   }

   async fn find_all(&self) -> Vec<Order> {
      self.orders.all()
   }

   async fn find_by_id(&self, id: OrderId) -> Option<Order> {
      self.orders.find(|o| o.id() == id)
   }

   async fn find_by_user(&self, user_id: UserId) -> Vec<Order> {
      self.orders.filter(|o| o.user_id() == user_id)
   }

   async fn save(&self, order: Order) {
      let id = order.id();
      self.orders.upsert(order, |o| o.id() == id);
   }
}
