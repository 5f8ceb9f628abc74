//! # API 結合テスト
//!
//! デモデータを投入したルーター全体に対してリクエストを送り、
//! 処理結果の連鎖が HTTP の応答まで一貫していることを検証する。
//!
//! - 成功は `{ "data": T }`、失敗は Problem Details で返る
//! - 失敗したリクエストはストアを変更しない（在庫の引き当てを除く）
//! - 在庫の引き当ては後続の失敗で巻き戻されない

use std::sync::Arc;

use axum::{Router, body::Body};
use http::{Method, Request, StatusCode, header};
use kekka_api::app_builder::{AppDependencies, build_app};
use kekka_domain::clock::SystemClock;
use kekka_infra::seed::seed_demo_data;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

/// デモデータ入りのアプリケーションを構築する
///
/// ユーザー 1: Alice、2: Bob
/// 商品 1: Laptop（1200, 在庫 50）、2: Mouse（25.50, 在庫 200）、3: Keyboard（75, 在庫 100）
async fn create_app() -> Router {
   let deps = AppDependencies::in_memory(Arc::new(SystemClock));
   seed_demo_data(
      deps.user_repository.as_ref(),
      deps.product_repository.as_ref(),
      deps.clock.as_ref(),
   )
   .await
   .unwrap();
   build_app(deps)
}

async fn send(
   app: &Router,
   method: Method,
   uri: &str,
   body: Option<Value>,
) -> (StatusCode, Value) {
   let builder = Request::builder().method(method).uri(uri);
   let request = match body {
      Some(body) => builder
         .header(header::CONTENT_TYPE, "application/json")
         .body(Body::from(body.to_string()))
         .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
   };

   let response = app.clone().oneshot(request).await.unwrap();
   let status = response.status();
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   let json = if bytes.is_empty() {
      Value::Null
   } else {
      serde_json::from_slice(&bytes).unwrap()
   };
   (status, json)
}

async fn stock_of(app: &Router, product_id: u64) -> u64 {
   let (_, body) = send(app, Method::GET, &format!("/products/{product_id}"), None).await;
   body["data"]["stock"].as_u64().unwrap()
}

#[tokio::test]
async fn test_ヘルスチェックは200を返す() {
   let app = create_app().await;

   let (status, body) = send(&app, Method::GET, "/health", None).await;

   assert_eq!(status, StatusCode::OK);
   assert_eq!(body["status"], "healthy");
   assert_eq!(body["service"], "kekka-api");
}

#[tokio::test]
async fn test_同じメールアドレスでの2回目の登録は409になる() {
   // Given
   let app = create_app().await;
   let request = json!({ "name": "Al", "email": "al@example.com" });
   let (status, created) = send(&app, Method::POST, "/users", Some(request.clone())).await;
   assert_eq!(status, StatusCode::CREATED);
   assert_eq!(created["data"]["id"], 3);

   // When
   let (status, problem) = send(&app, Method::POST, "/users", Some(request)).await;

   // Then
   assert_eq!(status, StatusCode::CONFLICT);
   assert_eq!(
      problem,
      json!({
         "type": "https://kekka.example.com/errors/conflict",
         "title": "Conflict",
         "status": 409,
         "detail": "メールアドレス al@example.com は既に使用されています",
         "code": "User.EmailExists"
      })
   );
}

#[tokio::test]
async fn test_在庫を超える注文は409で在庫は変わらない() {
   let app = create_app().await;

   let (status, problem) = send(
      &app,
      Method::POST,
      "/orders",
      Some(json!({ "user_id": 1, "items": [{ "product_id": 1, "quantity": 1_000_000 }] })),
   )
   .await;

   assert_eq!(status, StatusCode::CONFLICT);
   assert_eq!(problem["code"], "Product.InsufficientStock");
   assert_eq!(stock_of(&app, 1).await, 50);
}

#[tokio::test]
async fn test_合計が上限を超える注文は400で引き当て済みの在庫は戻らない() {
   // Given: Laptop 9 台で 10800
   let app = create_app().await;

   // When
   let (status, problem) = send(
      &app,
      Method::POST,
      "/orders",
      Some(json!({ "user_id": 1, "items": [{ "product_id": 1, "quantity": 9 }] })),
   )
   .await;

   // Then
   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(problem["code"], "Order.TotalExceedsLimit");
   assert_eq!(problem["title"], "Validation Error");
   assert_eq!(stock_of(&app, 1).await, 41);

   let (_, orders) = send(&app, Method::GET, "/orders", None).await;
   assert_eq!(orders, json!({ "data": [] }));
}

#[tokio::test]
async fn test_小計が桁あふれする注文は500ではなく400になる() {
   // Given: Decimal の最大値を価格に持つ商品
   let app = create_app().await;
   let (status, created) = send(
      &app,
      Method::POST,
      "/products",
      Some(json!({ "name": "Huge", "price": "79228162514264337593543950335", "stock": 5 })),
   )
   .await;
   assert_eq!(status, StatusCode::CREATED);
   let product_id = created["data"]["id"].as_u64().unwrap();

   // When
   let (status, problem) = send(
      &app,
      Method::POST,
      "/orders",
      Some(json!({ "user_id": 1, "items": [{ "product_id": product_id, "quantity": 2 }] })),
   )
   .await;

   // Then
   assert_eq!(status, StatusCode::BAD_REQUEST);
   assert_eq!(problem["code"], "Order.TotalExceedsLimit");
   assert_eq!(stock_of(&app, product_id).await, 3);
}

#[tokio::test]
async fn test_注文をキャンセルすると在庫が戻り2回目は409になる() {
   // Given
   let app = create_app().await;
   let (status, created) = send(
      &app,
      Method::POST,
      "/orders",
      Some(json!({
         "user_id": 2,
         "items": [
            { "product_id": 1, "quantity": 2 },
            { "product_id": 3, "quantity": 4 }
         ]
      })),
   )
   .await;
   assert_eq!(status, StatusCode::CREATED);
   assert_eq!(created["data"]["total"], "2700");
   assert_eq!(stock_of(&app, 1).await, 48);
   assert_eq!(stock_of(&app, 3).await, 96);

   // When
   let (status, cancelled) = send(&app, Method::POST, "/orders/1/cancel", None).await;

   // Then
   assert_eq!(status, StatusCode::OK);
   assert_eq!(cancelled["data"]["status"], "cancelled");
   assert_eq!(stock_of(&app, 1).await, 50);
   assert_eq!(stock_of(&app, 3).await, 100);

   let (status, problem) = send(&app, Method::POST, "/orders/1/cancel", None).await;
   assert_eq!(status, StatusCode::CONFLICT);
   assert_eq!(problem["code"], "Order.AlreadyCancelled");
   assert_eq!(stock_of(&app, 1).await, 50);
}

#[tokio::test]
async fn test_ユーザー別の注文一覧にはそのユーザーの注文だけが含まれる() {
   let app = create_app().await;
   for user_id in [1, 2, 1] {
      send(
         &app,
         Method::POST,
         "/orders",
         Some(json!({ "user_id": user_id, "items": [{ "product_id": 2, "quantity": 1 }] })),
      )
      .await;
   }

   let (status, body) = send(&app, Method::GET, "/users/1/orders", None).await;

   assert_eq!(status, StatusCode::OK);
   let ids: Vec<_> = body["data"]
      .as_array()
      .unwrap()
      .iter()
      .map(|order| order["id"].as_u64().unwrap())
      .collect();
   assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_壊れたjsonはinvalid_bodyのproblemになる() {
   let app = create_app().await;
   let request = Request::builder()
      .method(Method::POST)
      .uri("/products")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from(r#"{"name": "Pen", "price": "#))
      .unwrap();

   let response = app.oneshot(request).await.unwrap();

   assert_eq!(response.status(), StatusCode::BAD_REQUEST);
   assert_eq!(
      response.headers().get(header::CONTENT_TYPE).unwrap(),
      "application/problem+json"
   );
   let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
      .await
      .unwrap();
   let problem: Value = serde_json::from_slice(&bytes).unwrap();
   assert_eq!(problem["code"], "Request.InvalidBody");
   assert_eq!(problem["status"], 400);
}

#[tokio::test]
async fn test_商品を削除しても既存の注文明細は変わらない() {
   let app = create_app().await;
   send(
      &app,
      Method::POST,
      "/orders",
      Some(json!({ "user_id": 1, "items": [{ "product_id": 3, "quantity": 1 }] })),
   )
   .await;

   let (status, _) = send(&app, Method::DELETE, "/products/3", None).await;
   assert_eq!(status, StatusCode::NO_CONTENT);

   let (status, order) = send(&app, Method::GET, "/orders/1", None).await;
   assert_eq!(status, StatusCode::OK);
   assert_eq!(order["data"]["items"][0]["product_name"], "Keyboard");
   assert_eq!(order["data"]["items"][0]["unit_price"], "75");
}
