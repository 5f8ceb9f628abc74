//! # ProductRepository
//!
//! 商品の保存と検索を担当するリポジトリ。
//!
//! 在庫の引き当ても `save` で行う。同じ商品への並行した引き当ては
//! 後勝ちになるため、読み取りから保存までを 1 リクエスト内で完結させること。

use async_trait::async_trait;
use kekka_domain::product::{Product, ProductId};

use crate::memory::MemoryTable;

/// 商品リポジトリトレイト
#[async_trait]
pub trait ProductRepository: Send + Sync {
   async fn next_id(&self) -> ProductId;

   async fn find_all(&self) -> Vec<Product>;

   async fn find_by_id(&self, id: ProductId) -> Option<Product>;

   /// 商品を保存（同じ ID があれば置き換え）
   async fn save(&self, product: Product);

   /// 商品を削除し、削除したかどうかを返す
   async fn delete(&self, id: ProductId) -> bool;
}

/// インメモリ実装の ProductRepository
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
   products: MemoryTable<Product>,
}

impl InMemoryProductRepository {
   pub fn new() -> Self {
      Self::default()
   }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
   async fn next_id(&self) -> ProductId {
      ProductId::new(self.products.next_id())
   }

   async fn find_all(&self) -> Vec<Product> {
      self.products.all()
   }

   async fn find_by_id(&self, id: ProductId) -> Option<Product> {
      self.products.find(|p| p.id() == id)
   }

   async fn save(&self, product: Product) {
      let id = product.id();
      self.products.upsert(product, |p| p.id() == id);
   }

   async fn delete(&self, id: ProductId) -> bool {
      self.products.remove(|p| p.id() == id)
   }
}
