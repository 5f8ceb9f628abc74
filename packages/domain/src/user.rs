//! # ユーザー
//!
//! ユーザーレコードと、その生成・更新時に使う値オブジェクトを定義する。
//!
//! ## 設計方針
//!
//! - **生成時に検証**: [`UserName`] と [`Email`] は検証済みの値しか存在しない
//! - **正規化**: 名前は前後の空白を除去、メールアドレスはさらに小文字化して保持する
//! - **一意性は範囲外**: メールアドレスの重複はストアを見ないと判定できないため、
//!   ユースケース層で [`UserErrors::email_exists`] を返す
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kekka_domain::user::{Email, User, UserId, UserName};
//!
//! let user = User::new(
//!     UserId::new(1),
//!     UserName::new("  Alice ")?,
//!     Email::new("Alice@Example.com")?,
//!     chrono::Utc::now(),
//! );
//!
//! assert_eq!(user.name().as_str(), "Alice");
//! assert_eq!(user.email().as_str(), "alice@example.com");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, outcome::Outcome};

define_id! {
    /// ユーザー ID
    pub struct UserId;
}

/// ユーザー関連のエラーカタログ
pub struct UserErrors;

impl UserErrors {
    pub fn not_found(id: UserId) -> DomainError {
        DomainError::not_found("User.NotFound", format!("ユーザー {id} が見つかりません"))
    }

    pub fn name_required() -> DomainError {
        DomainError::validation("User.NameRequired", "ユーザー名は必須です")
    }

    pub fn name_too_long() -> DomainError {
        DomainError::validation(
            "User.NameTooLong",
            format!("ユーザー名は {} 文字以内である必要があります", UserName::MAX_LENGTH),
        )
    }

    pub fn email_required() -> DomainError {
        DomainError::validation("User.EmailRequired", "メールアドレスは必須です")
    }

    pub fn invalid_email() -> DomainError {
        DomainError::validation("User.InvalidEmail", "メールアドレスの形式が不正です")
    }

    pub fn email_exists(email: &Email) -> DomainError {
        DomainError::conflict(
            "User.EmailExists",
            format!("メールアドレス {email} は既に使用されています"),
        )
    }
}

define_name! {
    /// ユーザー名（前後の空白を除去、最大 100 文字）
    pub struct UserName {
        max_length: 100,
        required: UserErrors::name_required(),
        too_long: UserErrors::name_too_long(),
    }
}

/// メールアドレス（値オブジェクト）
///
/// 前後の空白を除去して小文字化した値を保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない（`User.EmailRequired`）
    /// - `local@domain` の形式で、`@` はちょうど 1 つ（`User.InvalidEmail`）
    /// - ドメイン部は `.` を含み、先頭・末尾は `.` ではない
    /// - 空白を含まない
    pub fn new(value: impl AsRef<str>) -> Outcome<Self> {
        let value = value.as_ref().trim().to_lowercase();

        if value.is_empty() {
            return Err(UserErrors::email_required());
        }

        if !Self::is_well_formed(&value) {
            return Err(UserErrors::invalid_email());
        }

        Ok(Self(value))
    }

    fn is_well_formed(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };

        !local.is_empty()
            && !domain.contains('@')
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && !value.chars().any(char::is_whitespace)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// ユーザー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:         UserId,
    name:       UserName,
    email:      Email,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, name: UserName, email: Email, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            email,
            created_at,
        }
    }

    /// 名前とメールアドレスを差し替えた新しいユーザーを返す
    ///
    /// ID と作成日時は引き継ぐ。
    pub fn with_profile(self, name: UserName, email: Email) -> Self {
        Self {
            name,
            email,
            ..self
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
