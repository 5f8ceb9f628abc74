//! # 注文ユースケース
//!
//! 注文の作成（在庫の引き当て）とキャンセル（在庫の返却）を扱う。
//!
//! ## 注文作成の流れ
//!
//! 1. 明細が 1 件以上あることを確認（`Order.EmptyItems`）
//! 2. 注文者が存在することを確認（`User.NotFound`）
//! 3. 明細ごとにリクエスト順で数量・商品・在庫を確認し、在庫を引き当てる
//! 4. 合計金額が上限以内であることを確認（`Order.TotalExceedsLimit`）
//! 5. 採番して `pending` で保存
//!
//! いずれかの段階で失敗すると後続は実行しない。
//!
//! ## 引き当ての巻き戻し
//!
//! 3 の途中や 4 で失敗しても、それまでに引き当てた在庫は戻さない。
//! 失敗した注文は保存されないため、引き当て分は注文と結び付かない。

use std::sync::Arc;

use kekka_domain::{
   AsyncOutcomeExt,
   Outcome,
   OutcomeExt,
   clock::Clock,
   order::{Order, OrderErrors, OrderId, OrderItem, Quantity, ensure_total_within_limit},
   outcome::success,
   product::{ProductErrors, ProductId},
   user::{UserErrors, UserId},
};
use kekka_infra::repository::{OrderRepository, ProductRepository, UserRepository};

use super::log_failure;

/// 注文明細の入力（未検証）
pub struct OrderLineInput {
   pub product_id: ProductId,
   pub quantity:   i64,
}

/// 注文作成の入力（未検証）
pub struct CreateOrderInput {
   pub user_id: UserId,
   pub items:   Vec<OrderLineInput>,
}

/// 注文ユースケース
pub struct OrderUseCaseImpl {
   order_repository:   Arc<dyn OrderRepository>,
   product_repository: Arc<dyn ProductRepository>,
   user_repository:    Arc<dyn UserRepository>,
   clock:              Arc<dyn Clock>,
}

impl OrderUseCaseImpl {
   pub fn new(
      order_repository: Arc<dyn OrderRepository>,
      product_repository: Arc<dyn ProductRepository>,
      user_repository: Arc<dyn UserRepository>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         order_repository,
         product_repository,
         user_repository,
         clock,
      }
   }

   pub async fn list_orders(&self) -> Outcome<Vec<Order>> {
      success(self.order_repository.find_all().await)
   }

   pub async fn get_order(&self, id: OrderId) -> Outcome<Order> {
      self
         .order_repository
         .find_by_id(id)
         .await
         .ok_or_else(|| OrderErrors::not_found(id))
   }

   /// 指定ユーザーの注文一覧
   ///
   /// ユーザーが存在しない場合は空の一覧ではなく `User.NotFound` を返す。
   pub async fn list_orders_for_user(&self, user_id: UserId) -> Outcome<Vec<Order>> {
      self
         .ensure_user_exists(user_id)
         .await
         .map_async(|()| self.order_repository.find_by_user(user_id))
         .await
   }

   pub async fn create_order(&self, input: CreateOrderInput) -> Outcome<Order> {
      let CreateOrderInput { user_id, items } = input;

      success(items)
         .ensure(|items| !items.is_empty(), OrderErrors::empty_items())
         .bind_async(|items| async move {
            self
               .ensure_user_exists(user_id)
               .await
               .map(|()| items)
         })
         .await
         .bind_async(|items| self.reserve_items(items))
         .await
         .bind(ensure_total_within_limit)
         .bind_async(|items| async move {
            let id = self.order_repository.next_id().await;
            success(Order::new(id, user_id, items, self.clock.now()))
         })
         .await
         .tap_async(|order| self.order_repository.save(order.clone()))
         .await
         .tap(|order| {
            tracing::info!(
               order_id = %order.id(),
               user_id = %order.user_id(),
               total = %order.total(),
               "注文を作成しました"
            );
         })
         .tap_error(log_failure("create_order"))
   }

   /// 注文をキャンセルし、明細の数量を在庫に戻す
   pub async fn cancel_order(&self, id: OrderId) -> Outcome<Order> {
      self
         .get_order(id)
         .await
         .bind(Order::cancelled)
         .tap_async(|order| self.release_items(order.items().to_vec()))
         .await
         .tap_async(|order| self.order_repository.save(order.clone()))
         .await
         .tap(|order| tracing::info!(order_id = %order.id(), "注文をキャンセルしました"))
         .tap_error(log_failure("cancel_order"))
   }

   async fn ensure_user_exists(&self, user_id: UserId) -> Outcome {
      self
         .user_repository
         .find_by_id(user_id)
         .await
         .map(|_| ())
         .ok_or_else(|| UserErrors::not_found(user_id))
   }

   /// 明細をリクエスト順に引き当てる
   ///
   /// 最初の失敗で止まり、以降の明細には触れない。
   async fn reserve_items(&self, lines: Vec<OrderLineInput>) -> Outcome<Vec<OrderItem>> {
      let mut reserved = success(Vec::with_capacity(lines.len()));
      for line in lines {
         reserved = reserved
            .bind_async(|mut items| async move {
               self.reserve_item(line).await.map(|item| {
                  items.push(item);
                  items
               })
            })
            .await;
      }
      reserved
   }

   /// 1 明細分の在庫を引き当て、注文時点の商品名と単価で明細を作る
   async fn reserve_item(&self, line: OrderLineInput) -> Outcome<OrderItem> {
      let OrderLineInput {
         product_id,
         quantity,
      } = line;

      Quantity::new(quantity)
         .bind_async(|quantity| async move {
            self
               .product_repository
               .find_by_id(product_id)
               .await
               .ok_or_else(|| ProductErrors::not_found(product_id))
               .ensure_with(
                  |product| product.can_fulfil(quantity.as_u32()),
                  |product| ProductErrors::insufficient_stock(product, quantity.as_u32()),
               )
               .map(|product| (product, quantity))
         })
         .await
         .map(|(product, quantity)| {
            let item = OrderItem::new(
               product.id(),
               product.name().to_string(),
               product.price(),
               quantity,
            );
            (product, item)
         })
         .bind(|(product, item)| {
            product
               .reserve(item.quantity().as_u32())
               .map(|reserved| (reserved, item))
         })
         .tap_async(|(reserved, _)| self.product_repository.save(reserved.clone()))
         .await
         .tap(|(reserved, item)| {
            tracing::debug!(
               product_id = %reserved.id(),
               quantity = item.quantity().as_u32(),
               remaining = reserved.stock().as_u32(),
               "在庫を引き当てました"
            );
         })
         .map(|(_, item)| item)
   }

   /// 明細の数量を在庫に戻す
   ///
   /// 注文後に削除された商品は戻し先がないため読み飛ばす。
   async fn release_items(&self, items: Vec<OrderItem>) {
      for item in items {
         match self.product_repository.find_by_id(item.product_id()).await {
            Some(product) => {
               let released = product.release(item.quantity().as_u32());
               self.product_repository.save(released).await;
            }
            None => tracing::debug!(
               product_id = %item.product_id(),
               "削除済みの商品のため在庫を戻しません"
            ),
         }
      }
   }
}
