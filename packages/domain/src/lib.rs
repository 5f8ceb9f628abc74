//! # Kekka ドメイン層
//!
//! 処理結果（[`Outcome`]）を中心に、ユーザー・商品・注文のドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **失敗は値**: ビジネスルール違反は [`DomainError`] として処理結果の失敗側に載せ、
//!   panic やエラーの送出で制御フローを分岐させない
//! - **合成で書く**: 検証・取得・保存の各段は `map` / `bind` / `ensure` / `tap` で
//!   つなぎ、最初の失敗で残りの段を飛ばす
//! - **境界を知らない**: HTTP ステータスや JSON の形はアプリケーション層の責務
//!
//! ## 依存関係の方向
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`error`] - エラー種別とドメインエラー
//! - [`outcome`] - 処理結果とコンビネータ（非同期版は [`outcome::future`]）
//! - [`clock`] - 時刻プロバイダ
//! - [`user`] / [`product`] / [`order`] - レコードと値オブジェクト、エラーカタログ

#[macro_use]
mod macros;

pub mod clock;
pub mod error;
pub mod order;
pub mod outcome;
pub mod product;
pub mod user;

pub use error::{DomainError, ErrorKind};
pub use outcome::{Outcome, OutcomeExt, future::AsyncOutcomeExt};
