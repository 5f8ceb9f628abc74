//! # 商品
//!
//! 商品レコードと価格・在庫の値オブジェクトを定義する。
//!
//! 在庫の増減は [`Product::reserve`] / [`Product::release`] でだけ行う。
//! どちらも自身を変更せず、在庫を差し替えた新しい商品を返す。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{DomainError, outcome::Outcome};

define_id! {
    /// 商品 ID
    pub struct ProductId;
}

/// 商品関連のエラーカタログ
pub struct ProductErrors;

impl ProductErrors {
    pub fn not_found(id: ProductId) -> DomainError {
        DomainError::not_found("Product.NotFound", format!("商品 {id} が見つかりません"))
    }

    pub fn name_required() -> DomainError {
        DomainError::validation("Product.NameRequired", "商品名は必須です")
    }

    pub fn name_too_long() -> DomainError {
        DomainError::validation(
            "Product.NameTooLong",
            format!("商品名は {} 文字以内である必要があります", ProductName::MAX_LENGTH),
        )
    }

    pub fn invalid_price() -> DomainError {
        DomainError::validation("Product.InvalidPrice", "価格は 0 より大きい必要があります")
    }

    pub fn invalid_stock() -> DomainError {
        DomainError::validation("Product.InvalidStock", "在庫数は 0 以上である必要があります")
    }

    pub fn insufficient_stock(product: &Product, requested: u32) -> DomainError {
        DomainError::conflict(
            "Product.InsufficientStock",
            format!(
                "{} の在庫が不足しています（在庫: {}、要求: {}）",
                product.name(),
                product.stock(),
                requested
            ),
        )
    }
}

define_name! {
    /// 商品名（前後の空白を除去、最大 200 文字）
    pub struct ProductName {
        max_length: 200,
        required: ProductErrors::name_required(),
        too_long: ProductErrors::name_too_long(),
    }
}

/// 価格（0 より大きい十進数）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Outcome<Self> {
        if value <= Decimal::ZERO {
            return Err(ProductErrors::invalid_price());
        }
        Ok(Self(value))
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// 在庫数（0 以上）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stock(u32);

impl Stock {
    /// 外部入力（符号付き）から在庫数を作成する
    pub fn new(value: i64) -> Outcome<Self> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| ProductErrors::invalid_stock())
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// 商品
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    id:    ProductId,
    name:  ProductName,
    price: Price,
    stock: Stock,
}

impl Product {
    pub fn new(id: ProductId, name: ProductName, price: Price, stock: Stock) -> Self {
        Self {
            id,
            name,
            price,
            stock,
        }
    }

    /// 名前・価格・在庫を差し替えた新しい商品を返す
    pub fn with_details(self, name: ProductName, price: Price, stock: Stock) -> Self {
        Self {
            name,
            price,
            stock,
            ..self
        }
    }

    /// 指定数量を在庫から引き当てられるか
    pub fn can_fulfil(&self, quantity: u32) -> bool {
        self.stock.0 >= quantity
    }

    /// 在庫を引き当てた商品を返す
    ///
    /// 在庫が足りない場合は `Product.InsufficientStock` の失敗になる。
    pub fn reserve(self, quantity: u32) -> Outcome<Self> {
        match self.stock.0.checked_sub(quantity) {
            Some(remaining) => Ok(Self {
                stock: Stock(remaining),
                ..self
            }),
            None => Err(ProductErrors::insufficient_stock(&self, quantity)),
        }
    }

    /// 引き当てた在庫を戻した商品を返す
    pub fn release(self, quantity: u32) -> Self {
        Self {
            stock: Stock(self.stock.0.saturating_add(quantity)),
            ..self
        }
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn stock(&self) -> Stock {
        self.stock
    }
}
