//! 管理端点集成测试
//!
//! 通过路由直接 oneshot 调用（不经过网络栈），
//! 覆盖认证、提交、list/complete/cancel 与校验失败。

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::Service;

use shop_server::api;
use shop_server::{Config, ServerState};
use shared::{EnchantmentUpdate, OrderItemInput, SubmitOrderRequest};

const SHARPNESS: &str = "enchantment:sharpness";
const SECRET: &str = "test-secret";

async fn test_app() -> (Router, ServerState, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);
    config.admin_password = SECRET.into();
    config.discord_webhook_url = None;
    let state = ServerState::initialize(&config).await.expect("state");
    let app = api::build_app(&state).with_state(state.clone());
    (app, state, dir)
}

async fn call(app: &mut Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.call(request).await.expect("infallible");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn submit_body(quantity: i64, offered_price: f64) -> serde_json::Value {
    serde_json::to_value(SubmitOrderRequest {
        discord_username: "steve#0001".into(),
        minecraft_username: "steve".into(),
        items: vec![OrderItemInput {
            enchantment: "Sharpness".into(),
            enchantment_id: SHARPNESS.into(),
            offered_price,
            quantity,
        }],
        total_price: offered_price * quantity as f64,
    })
    .expect("serialize")
}

fn manage_body(action: &str, password: &str, order_id: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({ "action": action, "password": password });
    if let Some(id) = order_id {
        body["orderId"] = serde_json::Value::String(id.to_string());
    }
    body
}

async fn set_stock(state: &ServerState, stock: i64) {
    shop_server::db::repository::EnchantmentRepository::new(state.db.clone())
        .update(
            SHARPNESS,
            EnchantmentUpdate {
                stock: Some(stock),
                ..Default::default()
            },
        )
        .await
        .expect("set stock");
}

#[tokio::test]
async fn wrong_password_is_rejected_for_every_action() {
    let (mut app, _state, _dir) = test_app().await;

    for action in ["list", "complete", "cancel"] {
        let (status, body) = call(
            &mut app,
            json_request(
                "POST",
                "/api/admin/orders",
                &manage_body(action, "wrong", Some("order:nope")),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "action {action}");
        assert_eq!(body["error"], "Unauthorized");
    }
}

#[tokio::test]
async fn submit_list_complete_roundtrip() {
    let (mut app, state, _dir) = test_app().await;
    set_stock(&state, 5).await;

    // Submit
    let (status, body) = call(
        &mut app,
        json_request("POST", "/api/orders", &submit_body(2, 15.0)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let order_id = body["orderId"].as_str().expect("orderId").to_string();

    // Stock decremented, visible through the public catalog
    let (status, body) = call(&mut app, get_request("/api/enchantments/sharpness")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 3);

    // List shows the pending order, newest first
    let (status, body) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("list", SECRET, None),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let orders = body["orders"].as_array().expect("orders");
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["id"], order_id.as_str());
    assert_eq!(orders[0]["status"], "pending");
    assert_eq!(orders[0]["item_count"], 1);
    assert_eq!(orders[0]["total_price"], 30.0);

    // Complete
    let (status, body) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("complete", SECRET, Some(&order_id)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // Completion does not restore stock
    let (_, body) = call(&mut app, get_request("/api/enchantments/sharpness")).await;
    assert_eq!(body["stock"], 3);

    // Completing again conflicts
    let (status, _) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("complete", SECRET, Some(&order_id)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn cancel_restores_stock_and_double_cancel_conflicts() {
    let (mut app, state, _dir) = test_app().await;
    set_stock(&state, 5).await;

    let (_, body) = call(
        &mut app,
        json_request("POST", "/api/orders", &submit_body(2, 15.0)),
    )
    .await;
    let order_id = body["orderId"].as_str().expect("orderId").to_string();

    let (status, body) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("cancel", SECRET, Some(&order_id)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, body) = call(&mut app, get_request("/api/enchantments/sharpness")).await;
    assert_eq!(body["stock"], 5);

    // 二次取消：409，库存不被二次回补
    let (status, _) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("cancel", SECRET, Some(&order_id)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = call(&mut app, get_request("/api/enchantments/sharpness")).await;
    assert_eq!(body["stock"], 5);
}

#[tokio::test]
async fn submission_validation_failures_are_400() {
    let (mut app, _state, _dir) = test_app().await;

    // No items
    let mut body = submit_body(1, 10.0);
    body["items"] = serde_json::json!([]);
    let (status, resp) = call(&mut app, json_request("POST", "/api/orders", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(resp["error"].as_str().unwrap().contains("items"));

    // Blank handle
    let mut body = submit_body(1, 10.0);
    body["discordUsername"] = serde_json::json!("   ");
    let (status, _) = call(&mut app, json_request("POST", "/api/orders", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Zero quantity
    let mut body = submit_body(1, 10.0);
    body["items"][0]["quantity"] = serde_json::json!(0);
    let (status, _) = call(&mut app, json_request("POST", "/api/orders", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 校验失败不应产生订单
    let (_, list) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("list", SECRET, None),
        ),
    )
    .await;
    assert_eq!(list["orders"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn admin_catalog_requires_the_header_secret() {
    let (mut app, _state, _dir) = test_app().await;

    // Without header
    let (status, _) = call(&mut app, get_request("/api/admin/enchantments")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // With header
    let request = Request::builder()
        .method("GET")
        .uri("/api/admin/enchantments")
        .header("x-admin-password", SECRET)
        .body(Body::empty())
        .expect("request");
    let (status, body) = call(&mut app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.as_array().expect("catalog").is_empty());
}

#[tokio::test]
async fn hidden_entries_are_absent_from_the_public_catalog() {
    let (mut app, state, _dir) = test_app().await;

    shop_server::db::repository::EnchantmentRepository::new(state.db.clone())
        .update(
            SHARPNESS,
            EnchantmentUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("hide");

    let (status, body) = call(&mut app, get_request("/api/enchantments")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .expect("catalog")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert!(!names.contains(&"Sharpness"));
    assert!(names.contains(&"Mending"));
}

#[tokio::test]
async fn management_of_missing_order_is_404() {
    let (mut app, _state, _dir) = test_app().await;

    let (status, _) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("complete", SECRET, Some("order:doesnotexist")),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Missing orderId on a mutating action is a validation error
    let (status, _) = call(
        &mut app,
        json_request(
            "POST",
            "/api/admin/orders",
            &manage_body("cancel", SECRET, None),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
