//! # Kekka API サーバー
//!
//! ユーザー・商品・注文の CRUD API。すべての操作は処理結果（`Outcome`）の
//! 連鎖として書かれ、境界で HTTP レスポンスに射影される。
//!
//! ```text
//! HTTP ──▶ handler ──▶ usecase ──▶ repository
//!            │            │
//!            │         Outcome<T>
//!            ▼            │
//!         response ◀──────┘
//!   (200/201/204 or Problem Details)
//! ```
//!
//! ## モジュール構成
//!
//! - [`app_builder`] - 依存の組み立てとルーター定義
//! - [`config`] - アプリケーション設定（環境変数からの読み込み）
//! - [`error`] - ドメインエラーの Problem Details への変換
//! - [`handler`] - HTTP リクエストハンドラ
//! - [`request`] - 抽出失敗の処理結果への変換
//! - [`response`] - 処理結果の HTTP レスポンスへの変換
//! - [`usecase`] - ユーザー・商品・注文のユースケース

pub mod app_builder;
pub mod config;
pub mod error;
pub mod handler;
pub mod request;
pub mod response;
pub mod usecase;
