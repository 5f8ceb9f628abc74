//! # 成功レスポンスエンベロープ
//!
//! 成功した処理結果の値を `{ "data": T }` 形式で包む。

use serde::{Deserialize, Serialize};

/// 成功レスポンスの統一形式
///
/// 値を返す成功レスポンス（200 / 201）はすべてこの形で返す。
/// 値を持たない成功（204）は本文を持たないため使用しない。
///
/// ```
/// use kekka_shared::ApiResponse;
///
/// let response = ApiResponse::new(vec![1, 2, 3]);
/// assert_eq!(response.data.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
