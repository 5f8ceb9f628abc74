//! # ヘルスチェックハンドラ
//!
//! ```text
//! GET /health
//! ```
//!
//! ストアへの到達は確認せず、プロセスが応答できることだけを返す。

use axum::Json;
use kekka_shared::HealthResponse;

/// サービス名
pub const SERVICE_NAME: &str = "kekka-api";

/// ヘルスチェックエンドポイント
///
/// 常に 200 OK を返す。
pub async fn health_check() -> Json<HealthResponse> {
   Json(HealthResponse::healthy(
      SERVICE_NAME,
      env!("CARGO_PKG_VERSION"),
   ))
}
