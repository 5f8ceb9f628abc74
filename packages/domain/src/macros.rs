/// 連番ベースの ID 型を定義する宣言型マクロ
///
/// 以下のボイラープレートを一括生成する:
/// - Newtype 構造体（`u64` をラップ）
/// - `derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)`
/// - `new()`: 採番済みの値から ID を作成
/// - `as_u64()`: 内部の値
/// - `From<u64>` impl（パスパラメータからの変換用）
///
/// 採番はリポジトリの責務で、この型は値を包むだけ。
///
/// # 使用例
///
/// ```rust
/// use kekka_domain::user::UserId;
///
/// let id = UserId::new(7);
/// assert_eq!(id.as_u64(), 7);
/// assert_eq!(id.to_string(), "7");
/// assert_eq!(UserId::from(7), id);
/// ```
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident;
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[serde(transparent)]
        #[display("{_0}")]
        $vis struct $Name(u64);

        impl $Name {
            /// 採番済みの値から ID を作成する
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// 内部の値を取得する
            pub const fn as_u64(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $Name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

/// 必須・最大長チェック付きの名前 Newtype を定義する宣言型マクロ
///
/// `new()` は前後の空白を除去したうえで、空なら `required`、
/// `max_length` 文字（`chars().count()`）を超えたら `too_long` のエラーを返す。
/// エラーは集約ごとのエラーカタログから渡す。
macro_rules! define_name {
    (
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident {
            max_length: $max_length:expr,
            required: $required:expr,
            too_long: $too_long:expr $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $Name(String);

        impl $Name {
            /// 最大文字数
            pub const MAX_LENGTH: usize = $max_length;

            pub fn new(value: impl AsRef<str>) -> $crate::outcome::Outcome<Self> {
                let value = value.as_ref().trim();

                if value.is_empty() {
                    return Err($required);
                }

                if value.chars().count() > Self::MAX_LENGTH {
                    return Err($too_long);
                }

                Ok(Self(value.to_string()))
            }

            /// 文字列参照を取得する
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $Name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}
