//! # 商品ハンドラ
//!
//! ## エンドポイント
//!
//! - `GET /products` - 商品一覧
//! - `POST /products` - 商品登録
//! - `GET /products/{id}` - 商品詳細
//! - `PUT /products/{id}` - 商品更新
//! - `DELETE /products/{id}` - 商品削除
//!
//! 価格は JSON の文字列（`"25.50"`）で返す。リクエストでは数値・文字列の
//! どちらも受け付ける。

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
   product::{Product, ProductId},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
   request,
   response,
   usecase::{ProductInput, ProductUseCaseImpl},
};

/// 商品 API の共有状態
pub struct ProductState {
   pub usecase: ProductUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// 商品 DTO
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
   pub id:    ProductId,
   pub name:  String,
   pub price: Decimal,
   pub stock: u32,
}

impl From<Product> for ProductDto {
   fn from(product: Product) -> Self {
      Self {
         id:    product.id(),
         name:  product.name().to_string(),
         price: product.price().as_decimal(),
         stock: product.stock().as_u32(),
      }
   }
}

/// 商品登録・更新リクエスト
///
/// 在庫は符号付きで受け取り、負数は検証エラーとして報告する。
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProductRequest {
   pub name:  String,
   pub price: Decimal,
   pub stock: i64,
}

impl From<ProductRequest> for ProductInput {
   fn from(request: ProductRequest) -> Self {
      Self {
         name:  request.name,
         price: request.price,
         stock: request.stock,
      }
   }
}

// --- ハンドラ ---

/// GET /products
#[tracing::instrument(skip_all)]
pub async fn list_products(State(state): State<Arc<ProductState>>) -> Response {
   let outcome = state
      .usecase
      .list_products()
      .map_ok(|products| products.into_iter().map(ProductDto::from).collect::<Vec<_>>())
      .await;

   response::ok(outcome)
}

/// GET /products/{id}
#[tracing::instrument(skip_all, fields(product_id))]
pub async fn get_product(
   State(state): State<Arc<ProductState>>,
   id: Result<Path<ProductId>, PathRejection>,
) -> Response {
   let outcome = request::path(id)
      .tap(record_product_id)
      .bind_async(|id| state.usecase.get_product(id))
      .await
      .map(ProductDto::from);

   response::ok(outcome)
}

/// POST /products
#[tracing::instrument(skip_all)]
pub async fn create_product(
   State(state): State<Arc<ProductState>>,
   payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Response {
   let outcome = request::body(payload)
      .bind_async(|request| state.usecase.create_product(request.into()))
      .await
      .map(ProductDto::from);

   response::created(outcome, |product| format!("/products/{}", product.id))
}

/// PUT /products/{id}
#[tracing::instrument(skip_all, fields(product_id))]
pub async fn update_product(
   State(state): State<Arc<ProductState>>,
   id: Result<Path<ProductId>, PathRejection>,
   payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Response {
   let outcome = combine(request::path(id).tap(record_product_id), request::body(payload))
      .bind_async(|(id, request)| state.usecase.update_product(id, request.into()))
      .await
      .map(ProductDto::from);

   response::ok(outcome)
}

/// DELETE /products/{id}
#[tracing::instrument(skip_all, fields(product_id))]
pub async fn delete_product(
   State(state): State<Arc<ProductState>>,
   id: Result<Path<ProductId>, PathRejection>,
) -> Response {
   let outcome = request::path(id)
      .tap(record_product_id)
      .bind_async(|id| state.usecase.delete_product(id))
      .await;

   response::no_content(outcome)
}

fn record_product_id(id: &ProductId) {
   tracing::Span::current().record("product_id", id.as_u64());
}
