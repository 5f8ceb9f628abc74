//! # デモデータ
//!
//! 起動直後から API を試せるよう、ユーザー 2 件と商品 3 件を投入する。

use kekka_domain::{
   Outcome,
   clock::Clock,
   product::{Price, Product, ProductName, Stock},
   user::{Email, User, UserName},
};
use rust_decimal::Decimal;

use crate::repository::{ProductRepository, UserRepository};

/// デモユーザー（名前, メールアドレス）
const DEMO_USERS: [(&str, &str); 2] = [
   ("Alice", "alice@example.com"),
   ("Bob", "bob@example.com"),
];

/// デモ商品（名前, 価格の仮数, 価格の小数桁数, 在庫）
const DEMO_PRODUCTS: [(&str, i64, u32, i64); 3] = [
   ("Laptop", 1200, 0, 50),
   ("Mouse", 2550, 2, 200),
   ("Keyboard", 75, 0, 100),
];

/// デモデータを投入する
///
/// 値オブジェクトの検証を通して作成するため、定義が検証に反していれば失敗を返す。
pub async fn seed_demo_data(
   users: &dyn UserRepository,
   products: &dyn ProductRepository,
   clock: &dyn Clock,
) -> Outcome {
   for (name, email) in DEMO_USERS {
      let user = User::new(
         users.next_id().await,
         UserName::new(name)?,
         Email::new(email)?,
         clock.now(),
      );
      users.save(user).await;
   }

   for (name, mantissa, scale, stock) in DEMO_PRODUCTS {
      let product = Product::new(
         products.next_id().await,
         ProductName::new(name)?,
         Price::new(Decimal::new(mantissa, scale))?,
         Stock::new(stock)?,
      );
      products.save(product).await;
   }

   tracing::info!(
      users = DEMO_USERS.len(),
      products = DEMO_PRODUCTS.len(),
      "デモデータを投入しました"
   );
   Ok(())
}

#[cfg(test)]
mod tests {
   use chrono::Utc;
   use kekka_domain::{clock::FixedClock, product::ProductId, user::UserId};
   use pretty_assertions::assert_eq;

   use super::*;
   use crate::repository::{InMemoryProductRepository, InMemoryUserRepository};

   #[tokio::test]
   async fn test_デモデータを投入するとユーザー2件と商品3件が入る() {
      // Given
      let users = InMemoryUserRepository::new();
      let products = InMemoryProductRepository::new();
      let clock = FixedClock::new(Utc::now());

      // When
      let result = seed_demo_data(&users, &products, &clock).await;

      // Then
      assert_eq!(result, Ok(()));
      assert_eq!(users.find_all().await.len(), 2);
      assert_eq!(products.find_all().await.len(), 3);

      let alice = users.find_by_id(UserId::new(1)).await.unwrap();
      assert_eq!(alice.email().as_str(), "alice@example.com");

      let laptop = products.find_by_id(ProductId::new(1)).await.unwrap();
      assert_eq!(laptop.name().as_str(), "Laptop");
      assert_eq!(laptop.stock().as_u32(), 50);

      let mouse = products.find_by_id(ProductId::new(2)).await.unwrap();
      assert_eq!(mouse.price().as_decimal(), Decimal::new(2550, 2));
   }
}
