//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保つ。抽出 → ユースケース → [`crate::response`] の
//!   一本の連鎖で書き、分岐はユースケースに任せる

pub mod health;
pub mod order;
pub mod product;
#[cfg(test)]
mod span_capture;
pub mod user;

pub use health::health_check;
pub use order::{
   OrderState,
   cancel_order,
   create_order,
   get_order,
   list_orders,
   list_user_orders,
};
pub use product::{
   ProductState,
   create_product,
   delete_product,
   get_product,
   list_products,
   update_product,
};
pub use user::{UserState, create_user, delete_user, get_user, list_users, update_user};
