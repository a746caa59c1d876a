// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::{json, Value};

fn sign_up_body(username: &str, email: &str, password: &str, confirmation: &str) -> Value {
    json!({
        "name": "Ada",
        "surname": "Lovelace",
        "username": username,
        "email": email,
        "password": password,
        "password_confirmation": confirmation
    })
}

/// 注册成功后令牌可以直接访问个人资料
#[tokio::test]
async fn sign_up_returns_usable_token() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/auth/signup")
        .json(&sign_up_body("ada", "ada@example.com", "secret1", "secret1"))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let token = response.json::<Value>()["token"].as_str().unwrap().to_string();

    let profile = app
        .server
        .get("/v1/users/me/profile")
        .add_header("Authorization", format!("Bearer {}", token))
        .await;
    assert_eq!(profile.status_code(), StatusCode::OK);
    let body = profile.json::<Value>();
    assert_eq!(body["username"], "ada");
    assert_eq!(body["roles"], json!(["USER"]));
}

/// 注册校验：两次密码不一致、用户已存在、字段不合法
#[tokio::test]
async fn sign_up_rejects_invalid_requests() {
    let app = create_test_app().await;

    let mismatch = app
        .server
        .post("/v1/auth/signup")
        .json(&sign_up_body("ada", "ada@example.com", "secret1", "secret2"))
        .await;
    assert_eq!(mismatch.status_code(), StatusCode::BAD_REQUEST);

    let existing = app
        .server
        .post("/v1/auth/signup")
        .json(&sign_up_body("ADMIN", "other@example.com", "secret1", "secret1"))
        .await;
    assert_eq!(existing.status_code(), StatusCode::BAD_REQUEST);

    let invalid = app
        .server
        .post("/v1/auth/signup")
        .json(&sign_up_body("ada", "not-an-email", "123", "123"))
        .await;
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    let body = invalid.json::<Value>();
    assert_eq!(body["error"], "Validation failed");
    assert!(body["errors"]["email"].is_array());
    assert!(body["errors"]["password"].is_array());
}

/// 错误的密码返回 401
#[tokio::test]
async fn sign_in_with_wrong_password_is_unauthorized() {
    let app = create_test_app().await;

    let response = app
        .server
        .post("/v1/auth/signin")
        .json(&json!({ "username": "admin", "password": "wrong" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let unknown = app
        .server
        .post("/v1/auth/signin")
        .json(&json!({ "username": "nobody", "password": "password" }))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::UNAUTHORIZED);
}

/// 缺少或无效令牌返回 401，非管理员访问管理接口返回 403
#[tokio::test]
async fn protected_routes_check_token_and_role() {
    let app = create_test_app().await;

    let missing = app.server.get("/v1/orders").await;
    assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

    let garbage = app
        .server
        .get("/v1/orders")
        .add_header("Authorization", "Bearer not.a.token")
        .await;
    assert_eq!(garbage.status_code(), StatusCode::UNAUTHORIZED);

    let user = app.user().await;
    let forbidden = app
        .server
        .get("/v1/orders")
        .add_header("Authorization", user)
        .await;
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

    let admin = app.admin().await;
    let allowed = app
        .server
        .get("/v1/orders")
        .add_header("Authorization", admin)
        .await;
    assert_eq!(allowed.status_code(), StatusCode::OK);
}
