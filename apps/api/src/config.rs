//! # アプリケーション設定
//!
//! 環境変数から API サーバーの設定を読み込む。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | 必須 | デフォルト | 説明 |
//! |--------|------|------------|------|
//! | `API_HOST` | No | `0.0.0.0` | バインドアドレス |
//! | `API_PORT` | No | `8080` | ポート番号 |
//! | `SEED_DEMO_DATA` | No | `true` | 起動時にデモデータを投入するか |
//! | `LOG_FORMAT` | No | `pretty` | ログ出力形式（`json` / `pretty` / `compact`） |
//! | `RUST_LOG` | No | `info,kekka=debug` | ログフィルタ |
//!
//! 不正な値は起動時に [`ConfigError`] として報告し、panic しない。

use std::{
   env,
   net::{IpAddr, SocketAddr},
   num::ParseIntError,
};

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// 設定の読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   #[error("API_HOST は IP アドレスである必要があります: {0:?}")]
   InvalidHost(String),

   #[error("API_PORT は有効なポート番号である必要があります: {value:?}")]
   InvalidPort {
      value:  String,
      #[source]
      source: ParseIntError,
   },

   #[error("{name} は true / false のいずれかである必要があります: {value:?}")]
   InvalidFlag { name: &'static str, value: String },
}

/// API サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
   /// バインドアドレス
   pub host:           IpAddr,
   /// ポート番号
   pub port:           u16,
   /// 起動時にデモデータを投入するか
   pub seed_demo_data: bool,
}

impl ApiConfig {
   /// 環境変数から設定を読み込む
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の参照関数から設定を読み込む
   ///
   /// テストでプロセスの環境変数を書き換えずに済むよう、参照元を差し替えられる。
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      let host = match lookup("API_HOST") {
         Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidHost(value))?,
         None => DEFAULT_HOST
            .parse()
            .map_err(|_| ConfigError::InvalidHost(DEFAULT_HOST.to_string()))?,
      };

      let port = match lookup("API_PORT") {
         Some(value) => value
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidPort { value, source })?,
         None => DEFAULT_PORT,
      };

      let seed_demo_data = match lookup("SEED_DEMO_DATA") {
         Some(value) => parse_flag("SEED_DEMO_DATA", value)?,
         None => true,
      };

      Ok(Self {
         host,
         port,
         seed_demo_data,
      })
   }

   /// 待ち受けアドレス
   pub fn socket_addr(&self) -> SocketAddr {
      SocketAddr::new(self.host, self.port)
   }
}

fn parse_flag(name: &'static str, value: String) -> Result<bool, ConfigError> {
   match value.trim().to_ascii_lowercase().as_str() {
      "true" | "1" | "yes" => Ok(true),
      "false" | "0" | "no" => Ok(false),
      _ => Err(ConfigError::InvalidFlag { name, value }),
   }
}
