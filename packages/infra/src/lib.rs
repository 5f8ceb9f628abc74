//! # Kekka インフラ層
//!
//! ドメイン層のレコードを保持するストアの実装を提供する。
//!
//! ## 設計方針
//!
//! - **トレイト越しに注入**: ユースケース層は [`repository`] のトレイトだけを知り、
//!   具体実装は `Arc<dyn …>` としてアプリケーション起動時に渡される
//! - **プロセス内ストア**: データはプロセスのメモリに置き、再起動で消える。
//!   ストア自身は失敗しないため、トレイトのメソッドは `Result` を返さない
//! - **整合性はストアの責務**: 各ストアは自身のコレクションをロックで守る。
//!   複数ストアにまたがる操作の原子性は保証しない
//!
//! ## 依存関係
//!
//! ```text
//! api → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`repository`] - リポジトリトレイトとインメモリ実装
//! - [`seed`] - デモデータの投入

mod memory;
pub mod repository;
pub mod seed;
