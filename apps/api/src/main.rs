//! # Kekka API サーバー
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `API_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `API_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `SEED_DEMO_DATA` | No | デモデータの投入（デフォルト: `true`） |
//! | `LOG_FORMAT` | No | `json` / `pretty` / `compact` |
//!
//! ## 起動方法
//!
//! ```bash
//! cargo run -p kekka-api
//! API_PORT=3000 SEED_DEMO_DATA=false LOG_FORMAT=json cargo run -p kekka-api --release
//! ```

use std::sync::Arc;

use kekka_api::{
   app_builder::{AppDependencies, build_app},
   config::ApiConfig,
   handler::health::SERVICE_NAME,
};
use kekka_domain::clock::SystemClock;
use kekka_infra::seed::seed_demo_data;
use kekka_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   init_tracing(&TracingConfig::from_env(SERVICE_NAME));

   let config = ApiConfig::from_env()?;
   let deps = AppDependencies::in_memory(Arc::new(SystemClock));

   if config.seed_demo_data {
      seed_demo_data(
         deps.user_repository.as_ref(),
         deps.product_repository.as_ref(),
         deps.clock.as_ref(),
      )
      .await?;
   }

   let app = build_app(deps);

   let addr = config.socket_addr();
   let listener = TcpListener::bind(addr).await?;
   tracing::info!(%addr, "API サーバーを起動しました");

   axum::serve(listener, app).await?;

   Ok(())
}
