//! 商品管理ユースケース

use std::sync::Arc;

use kekka_domain::{
   AsyncOutcomeExt,
   Outcome,
   OutcomeExt,
   outcome::{combine, success},
   product::{Price, Product, ProductErrors, ProductId, ProductName, Stock},
};
use kekka_infra::repository::ProductRepository;
use rust_decimal::Decimal;

use super::log_failure;

/// 商品登録・更新の入力（未検証）
pub struct ProductInput {
   pub name:  String,
   pub price: Decimal,
   pub stock: i64,
}

impl ProductInput {
   /// 名前 → 価格 → 在庫の順に検証し、最初のエラーを返す
   fn validate(&self) -> Outcome<(ProductName, Price, Stock)> {
      combine(
         ProductName::new(&self.name),
         combine(Price::new(self.price), Stock::new(self.stock)),
      )
      .map(|(name, (price, stock))| (name, price, stock))
   }
}

/// 商品管理ユースケース
pub struct ProductUseCaseImpl {
   product_repository: Arc<dyn ProductRepository>,
}

impl ProductUseCaseImpl {
   pub fn new(product_repository: Arc<dyn ProductRepository>) -> Self {
      Self { product_repository }
   }

   pub async fn list_products(&self) -> Outcome<Vec<Product>> {
      success(self.product_repository.find_all().await)
   }

   pub async fn get_product(&self, id: ProductId) -> Outcome<Product> {
      self
         .product_repository
         .find_by_id(id)
         .await
         .ok_or_else(|| ProductErrors::not_found(id))
   }

   pub async fn create_product(&self, input: ProductInput) -> Outcome<Product> {
      input
         .validate()
         .bind_async(|(name, price, stock)| async move {
            let id = self.product_repository.next_id().await;
            success(Product::new(id, name, price, stock))
         })
         .await
         .tap_async(|product| self.product_repository.save(product.clone()))
         .await
         .tap(|product| {
            tracing::info!(
               product_id = %product.id(),
               stock = product.stock().as_u32(),
               "商品を登録しました"
            );
         })
         .tap_error(log_failure("create_product"))
   }

   pub async fn update_product(&self, id: ProductId, input: ProductInput) -> Outcome<Product> {
      self
         .get_product(id)
         .await
         .bind(|product| {
            input
               .validate()
               .map(|(name, price, stock)| product.with_details(name, price, stock))
         })
         .tap_async(|product| self.product_repository.save(product.clone()))
         .await
         .tap(|product| tracing::info!(product_id = %product.id(), "商品を更新しました"))
         .tap_error(log_failure("update_product"))
   }

   /// 商品を削除する
   ///
   /// 既存の注文明細は商品名と単価の写しを持つため、削除後も影響を受けない。
   pub async fn delete_product(&self, id: ProductId) -> Outcome {
      success(self.product_repository.delete(id).await)
         .ensure(|deleted| *deleted, ProductErrors::not_found(id))
         .map(|_| ())
         .tap(|_| tracing::info!(product_id = %id, "商品を削除しました"))
         .tap_error(log_failure("delete_product"))
   }
}
