//! # リポジトリ
//!
//! ユーザー・商品・注文の保存と検索を担当する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイトにだけ依存する
//! - **値で受け取り、複製で返す**: `save` は所有権ごと受け取り、検索系はストア内の
//!   値の複製を返す。呼び出し側が持つレコードはストアと共有されない
//! - **採番はストアが行う**: `next_id` は 1 始まりの連番を払い出す

pub mod order_repository;
pub mod product_repository;
pub mod user_repository;

pub use order_repository::{InMemoryOrderRepository, OrderRepository};
pub use product_repository::{InMemoryProductRepository, ProductRepository};
pub use user_repository::{InMemoryUserRepository, UserRepository};
