//! # 注文ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /orders` - 注文一覧
//! - `POST /orders` - 注文作成（在庫の引き当て）
//! - `GET /orders/{id}` - 注文詳細
//! - `POST /orders/{id}/cancel` - 注文キャンセル（在庫の返却）
//! - `GET /users/{id}/orders` - ユーザー別の注文一覧

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
   order::{Order, OrderId, OrderItem, OrderStatus},
   product::ProductId,
   user::UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
   request,
   response,
   usecase::{CreateOrderInput, OrderLineInput, OrderUseCaseImpl},
};

/// 注文 API の共有状態
pub struct OrderState {
   pub usecase: OrderUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 注文明細 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemDto {
   pub product_id:   ProductId,
   pub product_name: String,
   pub unit_price:   Decimal,
   pub quantity:     u32,
   pub subtotal:     Decimal,
}

impl From<&OrderItem> for OrderItemDto {
   fn from(item: &OrderItem) -> Self {
      Self {
         product_id:   item.product_id(),
         product_name: item.product_name().to_string(),
         unit_price:   item.unit_price().as_decimal(),
         quantity:     item.quantity().as_u32(),
         subtotal:     item.subtotal(),
      }
   }
}

/// 注文 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDto {
   pub id:         OrderId,
   pub user_id:    UserId,
   pub items:      Vec<OrderItemDto>,
   pub total:      Decimal,
   pub status:     OrderStatus,
   pub created_at: String,
}

impl From<Order> for OrderDto {
   fn from(order: Order) -> Self {
      Self {
         id:         order.id(),
         user_id:    order.user_id(),
         items:      order.items().iter().map(OrderItemDto::from).collect(),
         total:      order.total(),
         status:     order.status(),
         created_at: order.created_at().to_rfc3339(),
      }
   }
}

/// 注文明細リクエスト
#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
   pub product_id: ProductId,
   #[serde(default)]
   pub quantity:   i64,
}

/// 注文作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
   pub user_id: UserId,
   #[serde(default)]
   pub items:   Vec<OrderLineRequest>,
}

impl From<CreateOrderRequest> for CreateOrderInput {
   fn from(request: CreateOrderRequest) -> Self {
      Self {
         user_id: request.user_id,
         items:   request
            .items
            .into_iter()
            .map(|line| OrderLineInput {
               product_id: line.product_id,
               quantity:   line.quantity,
            })
            .collect(),
      }
   }
}

fn to_dtos(orders: Vec<Order>) -> Vec<OrderDto> {
   orders.into_iter().map(OrderDto::from).collect()
}

// --- ハンドラ ---

/// GET /orders
#[tracing::instrument(skip_all)]
pub async fn list_orders(State(state): State<Arc<OrderState>>) -> Response {
   response::ok(state.usecase.list_orders().map_ok(to_dtos).await)
}

/// GET /orders/{id}
#[tracing::instrument(skip_all, fields(order_id))]
pub async fn get_order(
   State(state): State<Arc<OrderState>>,
   id: Result<Path<OrderId>, PathRejection>,
) -> Response {
   let outcome = request::path(id)
      .tap(record_order_id)
      .bind_async(|id| state.usecase.get_order(id))
      .await
      .map(OrderDto::from);

   response::ok(outcome)
}

/// GET /users/{id}/orders
#[tracing::instrument(skip_all, fields(user_id))]
pub async fn list_user_orders(
   State(state): State<Arc<OrderState>>,
   user_id: Result<Path<UserId>, PathRejection>,
) -> Response {
   let outcome = request::path(user_id)
      .tap(record_user_id)
      .bind_async(|user_id| state.usecase.list_orders_for_user(user_id))
      .await
      .map(to_dtos);

   response::ok(outcome)
}

/// POST /orders
///
/// ## レスポンス
///
/// - `201 Created`: 作成した注文（`Location: /orders/{id}`）
/// - `400 Bad Request`: 明細なし、数量不正、合計金額が上限超過
/// - `404 Not Found`: ユーザーまたは商品が見つからない
/// - `409 Conflict`: 在庫不足
#[tracing::instrument(skip_all, fields(user_id, order_id))]
pub async fn create_order(
   State(state): State<Arc<OrderState>>,
   payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Response {
   let outcome = request::body(payload)
      .tap(|request| record_user_id(&request.user_id))
      .bind_async(|request| state.usecase.create_order(request.into()))
      .await
      .tap(|order| record_order_id(&order.id()))
      .map(OrderDto::from);

   response::created(outcome, |order| format!("/orders/{}", order.id))
}

/// POST /orders/{id}/cancel
///
/// ## レスポンス
///
/// - `200 OK`: キャンセル後の注文
/// - `404 Not Found`: 注文が見つからない
/// - `409 Conflict`: 既にキャンセル済み
#[tracing::instrument(skip_all, fields(order_id))]
pub async fn cancel_order(
   State(state): State<Arc<OrderState>>,
   id: Result<Path<OrderId>, PathRejection>,
) -> Response {
   let outcome = request::path(id)
      .tap(record_order_id)
      .bind_async(|id| state.usecase.cancel_order(id))
      .await
      .map(OrderDto::from);

   response::ok(outcome)
}

fn record_order_id(id: &OrderId) {
   tracing::Span::current().record("order_id", id.as_u64());
}

fn record_user_id(id: &UserId) {
   tracing::Span::current().record("user_id", id.as_u64());
}
