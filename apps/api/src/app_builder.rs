//! # アプリケーション構築
//!
//! 依存（リポジトリ・時刻）からユースケースと State を組み立て、ルーターを構築する。
//! `main.rs` は設定の読み込みとサーバー起動に集中する。

use std::sync::Arc;

use axum::{
   Router,
   routing::{get, post},
};
use kekka_domain::clock::Clock;
use kekka_infra::repository::{
   InMemoryOrderRepository,
   InMemoryProductRepository,
   InMemoryUserRepository,
   OrderRepository,
   ProductRepository,
   UserRepository,
};
use tower_http::trace::TraceLayer;

use crate::{
   handler::{
      OrderState,
      ProductState,
      UserState,
      cancel_order,
      create_order,
      create_product,
      create_user,
      delete_product,
      delete_user,
      get_order,
      get_product,
      get_user,
      health_check,
      list_orders,
      list_products,
      list_user_orders,
      list_users,
      update_product,
      update_user,
   },
   usecase::{OrderUseCaseImpl, ProductUseCaseImpl, UserUseCaseImpl},
};

/// ルーターが必要とする依存
#[derive(Clone)]
pub struct AppDependencies {
   pub user_repository:    Arc<dyn UserRepository>,
   pub product_repository: Arc<dyn ProductRepository>,
   pub order_repository:   Arc<dyn OrderRepository>,
   pub clock:              Arc<dyn Clock>,
}

impl AppDependencies {
   /// 空のインメモリストアで依存を作る
   pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
      Self {
         user_repository: Arc::new(InMemoryUserRepository::new()),
         product_repository: Arc::new(InMemoryProductRepository::new()),
         order_repository: Arc::new(InMemoryOrderRepository::new()),
         clock,
      }
   }
}

/// State の組み立てとルーター定義を行う
pub fn build_app(deps: AppDependencies) -> Router {
   let user_state = Arc::new(UserState {
      usecase: UserUseCaseImpl::new(deps.user_repository.clone(), deps.clock.clone()),
   });

   let product_state = Arc::new(ProductState {
      usecase: ProductUseCaseImpl::new(deps.product_repository.clone()),
   });

   // 注文はユーザーと商品の両方を参照する
   let order_state = Arc::new(OrderState {
      usecase: OrderUseCaseImpl::new(
         deps.order_repository,
         deps.product_repository,
         deps.user_repository,
         deps.clock,
      ),
   });

   Router::new()
      .route("/health", get(health_check))
      // ユーザー API
      .route("/users", get(list_users).post(create_user))
      .route(
         "/users/{id}",
         get(get_user).put(update_user).delete(delete_user),
      )
      .with_state(user_state)
      // 商品 API
      .route("/products", get(list_products).post(create_product))
      .route(
         "/products/{id}",
         get(get_product).put(update_product).delete(delete_product),
      )
      .with_state(product_state)
      // 注文 API
      .route("/orders", get(list_orders).post(create_order))
      .route("/orders/{id}", get(get_order))
      .route("/orders/{id}/cancel", post(cancel_order))
      .route("/users/{id}/orders", get(list_user_orders))
      .with_state(order_state)
      .layer(TraceLayer::new_for_http())
}
