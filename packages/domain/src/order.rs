//! # 注文
//!
//! 注文レコード・注文明細・注文ステータスを定義する。
//!
//! ## 設計方針
//!
//! - **明細は注文時点の写し**: [`OrderItem`] は商品名と単価をコピーして持つ。
//!   後から商品が変更・削除されても注文の内容は変わらない
//! - **合計は明細から導出**: 合計金額は保存せず、[`Order::total`] で毎回計算する
//! - **金額計算は桁あふれを検査する**: [`total_of`] は `Decimal` の範囲を超えると
//!   `None` を返し、上限確認ではそれも上限超過として扱う
//! - **上限は採番前に確認**: 合計が [`ORDER_TOTAL_LIMIT`] を超える明細は
//!   [`ensure_total_within_limit`] で弾き、注文 ID を消費しない
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use kekka_domain::{
//!     order::{Order, OrderId, OrderItem, OrderStatus, Quantity},
//!     product::{Price, ProductId},
//!     user::UserId,
//! };
//! use rust_decimal::Decimal;
//!
//! let item = OrderItem::new(
//!     ProductId::new(2),
//!     "Mouse".to_string(),
//!     Price::new(Decimal::new(2550, 2))?,
//!     Quantity::new(2)?,
//! );
//! let order = Order::new(OrderId::new(1), UserId::new(1), vec![item], chrono::Utc::now());
//!
//! assert_eq!(order.total(), Decimal::new(5100, 2));
//! assert_eq!(order.status(), OrderStatus::Pending);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;

use crate::{
    DomainError,
    outcome::{Outcome, OutcomeExt, success},
    product::{Price, ProductId},
    user::UserId,
};

/// 1 注文あたりの合計金額の上限
pub const ORDER_TOTAL_LIMIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

define_id! {
    /// 注文 ID
    pub struct OrderId;
}

/// 注文関連のエラーカタログ
pub struct OrderErrors;

impl OrderErrors {
    pub fn not_found(id: OrderId) -> DomainError {
        DomainError::not_found("Order.NotFound", format!("注文 {id} が見つかりません"))
    }

    pub fn empty_items() -> DomainError {
        DomainError::validation("Order.EmptyItems", "注文には 1 件以上の明細が必要です")
    }

    pub fn invalid_quantity() -> DomainError {
        DomainError::validation("Order.InvalidQuantity", "数量は 1 以上である必要があります")
    }

    pub fn total_exceeds_limit(total: Decimal) -> DomainError {
        DomainError::validation(
            "Order.TotalExceedsLimit",
            format!("合計金額 {total} が上限 {ORDER_TOTAL_LIMIT} を超えています"),
        )
    }

    /// 合計金額が `Decimal` で表せないほど大きい場合の上限超過エラー
    pub fn total_overflows_limit() -> DomainError {
        DomainError::validation(
            "Order.TotalExceedsLimit",
            format!("合計金額が上限 {ORDER_TOTAL_LIMIT} を超えています"),
        )
    }

    pub fn already_cancelled(id: OrderId) -> DomainError {
        DomainError::conflict(
            "Order.AlreadyCancelled",
            format!("注文 {id} は既にキャンセルされています"),
        )
    }
}

/// 注文ステータス
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    /// 受付済み
    Pending,
    /// キャンセル済み（在庫は戻されている）
    Cancelled,
}

/// 注文数量（1 以上）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// 外部入力（符号付き）から数量を作成する
    pub fn new(value: i64) -> Outcome<Self> {
        u32::try_from(value)
            .ok()
            .filter(|q| *q > 0)
            .map(Self)
            .ok_or_else(OrderErrors::invalid_quantity)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

/// 注文明細
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    product_id:   ProductId,
    product_name: String,
    unit_price:   Price,
    quantity:     Quantity,
}

impl OrderItem {
    pub fn new(
        product_id: ProductId,
        product_name: String,
        unit_price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            product_id,
            product_name,
            unit_price,
            quantity,
        }
    }

    /// 小計（単価 × 数量）。桁あふれ時は `None`
    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.unit_price
            .as_decimal()
            .checked_mul(Decimal::from(self.quantity.as_u32()))
    }

    /// 小計（単価 × 数量）。桁あふれ時は `Decimal::MAX` に飽和する
    pub fn subtotal(&self) -> Decimal {
        self.unit_price
            .as_decimal()
            .saturating_mul(Decimal::from(self.quantity.as_u32()))
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn unit_price(&self) -> Price {
        self.unit_price
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// 明細の合計金額
///
/// 小計または合計が `Decimal` の範囲を超えた場合は `None`。
pub fn total_of(items: &[OrderItem]) -> Option<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.checked_subtotal()
            .and_then(|subtotal| total.checked_add(subtotal))
    })
}

/// 明細の合計金額が上限以内であることを確認する
///
/// 上限ちょうどは受け付ける。合計が桁あふれする場合も上限超過になる。
pub fn ensure_total_within_limit(items: Vec<OrderItem>) -> Outcome<Vec<OrderItem>> {
    success(items).ensure_with(
        |items| matches!(total_of(items), Some(total) if total <= ORDER_TOTAL_LIMIT),
        |items| match total_of(items) {
            Some(total) => OrderErrors::total_exceeds_limit(total),
            None => OrderErrors::total_overflows_limit(),
        },
    )
}

/// 注文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id:         OrderId,
    user_id:    UserId,
    items:      Vec<OrderItem>,
    status:     OrderStatus,
    created_at: DateTime<Utc>,
}

impl Order {
    /// 受付済みの注文を作成する
    pub fn new(
        id: OrderId,
        user_id: UserId,
        items: Vec<OrderItem>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            items,
            status: OrderStatus::Pending,
            created_at,
        }
    }

    /// 合計金額
    ///
    /// 保存される注文は上限確認を通っているため桁あふれしない。
    /// 直接組み立てた明細で範囲を超えた場合は `Decimal::MAX` に飽和する。
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.subtotal()))
    }

    /// キャンセル済みにした注文を返す
    ///
    /// 既にキャンセル済みなら `Order.AlreadyCancelled` の失敗になる。
    pub fn cancelled(self) -> Outcome<Self> {
        match self.status {
            OrderStatus::Cancelled => Err(OrderErrors::already_cancelled(self.id)),
            OrderStatus::Pending => Ok(Self {
                status: OrderStatus::Cancelled,
                ..self
            }),
        }
    }

    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
