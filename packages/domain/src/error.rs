//! # ドメインエラー定義
//!
//! 処理結果の失敗側に載るエラー値を定義する。
//!
//! ## 設計方針
//!
//! - **種別はタグで持つ**: 種別ごとに型を分けず、閉じた列挙型 [`ErrorKind`] を
//!   エラー値自身に持たせる。境界層はこのタグだけを見てレスポンスを選ぶ
//! - **コードは安定した識別子**: `"User.NotFound"` のような機械可読な文字列。
//!   発生箇所ごとに一意で、説明文が変わっても変わらない
//! - **不変な値**: 生成後に書き換えない。コンビネータは受け取ったエラーを
//!   そのまま次へ渡す
//!
//! ## エラー種別と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `Conflict` | 409 Conflict | 一意制約・在庫などの状態競合 |
//! | `Unauthorized` | 401 Unauthorized | 認証されていない |
//! | `Forbidden` | 403 Forbidden | 権限不足 |
//! | `Failure` | 400 Bad Request | 分類されない失敗（既定） |
//!
//! ## 使用例
//!
//! ```rust
//! use kekka_domain::{DomainError, ErrorKind};
//!
//! let error = DomainError::not_found("User.NotFound", "ユーザーが見つかりません");
//! assert_eq!(error.kind(), ErrorKind::NotFound);
//! assert_eq!(error.code(), "User.NotFound");
//! ```

use std::borrow::Cow;

use strum::IntoStaticStr;
use thiserror::Error;

/// エラー種別
///
/// 境界層がレスポンスの形を決めるための閉じた分類。
/// バリアントの追加・対応の変更は API 利用者に対する破壊的変更になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, strum::Display)]
pub enum ErrorKind {
    /// エンティティが存在しない
    NotFound,
    /// 入力値がビジネスルールに違反している
    Validation,
    /// 既存の状態と競合する（メール重複、在庫不足など）
    Conflict,
    /// 認証されていない
    Unauthorized,
    /// 認証済みだが権限がない
    Forbidden,
    /// 上記に分類されない失敗
    Failure,
}

/// ドメインエラー
///
/// 種別・コード・説明の 3 つ組。
///
/// # 番兵値
///
/// [`DomainError::none`] は「エラーなし」を表す番兵値で、成功した結果に対して
/// [`error()`](crate::outcome::OutcomeExt::error) を呼んだときにだけ現れる。
/// 失敗側に載せることはできず、利用者に見せてはならない。
/// 番兵値は専用の印で区別するため、公開コンストラクタで作ったどのエラーとも等しくならない。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[error("{code}: {description}")]
pub struct DomainError {
    kind:        ErrorKind,
    code:        Cow<'static, str>,
    description: Cow<'static, str>,
    sentinel:    bool,
}

impl DomainError {
    const fn from_static(kind: ErrorKind, code: &'static str, description: &'static str) -> Self {
        Self {
            kind,
            code: Cow::Borrowed(code),
            description: Cow::Borrowed(description),
            sentinel: false,
        }
    }

    fn with_kind(
        kind: ErrorKind,
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            description: description.into(),
            sentinel: false,
        }
    }

    /// 「エラーなし」の番兵値
    pub const fn none() -> Self {
        Self {
            kind:        ErrorKind::Failure,
            code:        Cow::Borrowed(""),
            description: Cow::Borrowed(""),
            sentinel:    true,
        }
    }

    /// 値が存在しなかったことを表すエラー
    ///
    /// `Option::None` を結果に変換したときに使われる。
    pub const fn null_value() -> Self {
        Self::from_static(
            ErrorKind::Failure,
            "Error.NullValue",
            "値が存在しません",
        )
    }

    pub fn not_found(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::with_kind(ErrorKind::NotFound, code, description)
    }

    pub fn validation(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::with_kind(ErrorKind::Validation, code, description)
    }

    pub fn conflict(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::with_kind(ErrorKind::Conflict, code, description)
    }

    pub fn unauthorized(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::with_kind(ErrorKind::Unauthorized, code, description)
    }

    pub fn forbidden(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::with_kind(ErrorKind::Forbidden, code, description)
    }

    /// 分類されない失敗（既定の種別）
    pub fn failure(
        code: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::with_kind(ErrorKind::Failure, code, description)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// 番兵値かどうか
    pub fn is_none(&self) -> bool {
        self.sentinel
    }
}
