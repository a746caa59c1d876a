// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{create_test_app, order_body};
use axum::http::StatusCode;
use serde_json::{json, Value};

fn user_body(username: &str, email: &str) -> Value {
    json!({
        "name": "Grace",
        "surname": "Hopper",
        "username": username,
        "email": email,
        "password": "secret1"
    })
}

/// 管理员分页查询用户
#[tokio::test]
async fn admin_lists_users() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let page = app
        .server
        .get("/v1/users")
        .add_header("Authorization", admin.clone())
        .await
        .json::<Value>();
    assert_eq!(page["total_elements"], 2);
    assert!(page["content"][0].get("password").is_none());

    let filtered = app
        .server
        .get("/v1/users?username=ADM")
        .add_header("Authorization", admin)
        .await
        .json::<Value>();
    assert_eq!(filtered["total_elements"], 1);
    assert_eq!(filtered["content"][0]["roles"], json!(["ADMIN", "USER"]));
}

/// 创建与更新用户时用户名和邮箱唯一
#[tokio::test]
async fn create_and_update_user_rules() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let created = app
        .server
        .post("/v1/users")
        .add_header("Authorization", admin.clone())
        .json(&user_body("grace", "grace@example.com"))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let created = created.json::<Value>();
    assert_eq!(created["roles"], json!(["USER"]));
    let id = created["id"].as_i64().unwrap();

    let duplicate = app
        .server
        .post("/v1/users")
        .add_header("Authorization", admin.clone())
        .json(&user_body("someone", "GRACE@example.com"))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let no_password = app
        .server
        .post("/v1/users")
        .add_header("Authorization", admin.clone())
        .json(&json!({
            "name": "No",
            "surname": "Password",
            "username": "nopass",
            "email": "nopass@example.com"
        }))
        .await;
    assert_eq!(no_password.status_code(), StatusCode::BAD_REQUEST);

    let taken = app
        .server
        .put(&format!("/v1/users/{}", id))
        .add_header("Authorization", admin.clone())
        .json(&user_body("grace", "admin@storefront.dev"))
        .await;
    assert_eq!(taken.status_code(), StatusCode::CONFLICT);

    // Keeping its own username and email is fine
    let updated = app
        .server
        .put(&format!("/v1/users/{}", id))
        .add_header("Authorization", admin)
        .json(&json!({
            "name": "Grace B.",
            "surname": "Hopper",
            "username": "grace",
            "email": "grace@example.com",
            "password": "another1"
        }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json::<Value>()["name"], "Grace B.");

    let sign_in = app
        .server
        .post("/v1/auth/signin")
        .json(&json!({ "username": "grace", "password": "another1" }))
        .await;
    assert_eq!(sign_in.status_code(), StatusCode::OK);
}

/// 有订单的用户逻辑删除，没有订单的用户物理删除
#[tokio::test]
async fn delete_user_soft_or_hard() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let order = app
        .server
        .post("/v1/orders")
        .add_header("Authorization", admin.clone())
        .json(&order_body(2, &[(4, 1, 1.5)]))
        .await
        .json::<Value>();

    let info = app
        .server
        .get("/v1/users/2")
        .add_header("Authorization", admin.clone())
        .await
        .json::<Value>();
    assert_eq!(info["orders"], json!([order["id"]]));

    let soft = app
        .server
        .delete("/v1/users/2")
        .add_header("Authorization", admin.clone())
        .await;
    assert_eq!(soft.status_code(), StatusCode::NO_CONTENT);

    let still_there = app
        .server
        .get("/v1/users/2")
        .add_header("Authorization", admin.clone())
        .await;
    assert_eq!(still_there.status_code(), StatusCode::OK);
    assert_eq!(still_there.json::<Value>()["is_deleted"], true);

    let sign_in = app
        .server
        .post("/v1/auth/signin")
        .json(&json!({ "username": "user", "password": "password" }))
        .await;
    assert_eq!(sign_in.status_code(), StatusCode::UNAUTHORIZED);

    let created = app
        .server
        .post("/v1/users")
        .add_header("Authorization", admin.clone())
        .json(&user_body("temp", "temp@example.com"))
        .await
        .json::<Value>();
    let id = created["id"].as_i64().unwrap();

    let hard = app
        .server
        .delete(&format!("/v1/users/{}", id))
        .add_header("Authorization", admin.clone())
        .await;
    assert_eq!(hard.status_code(), StatusCode::NO_CONTENT);

    let gone = app
        .server
        .get(&format!("/v1/users/{}", id))
        .add_header("Authorization", admin)
        .await;
    assert_eq!(gone.status_code(), StatusCode::NOT_FOUND);
}

/// 当前用户的资料接口不能提升自己的角色
#[tokio::test]
async fn my_profile() {
    let app = create_test_app().await;
    let user = app.user().await;

    let profile = app
        .server
        .get("/v1/users/me/profile")
        .add_header("Authorization", user.clone())
        .await;
    assert_eq!(profile.status_code(), StatusCode::OK);
    assert_eq!(profile.json::<Value>()["username"], "user");

    let updated = app
        .server
        .put("/v1/users/me/profile")
        .add_header("Authorization", user.clone())
        .json(&json!({
            "name": "Plain",
            "surname": "User",
            "username": "user",
            "email": "user@storefront.dev",
            "roles": ["ADMIN"]
        }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let updated = updated.json::<Value>();
    assert_eq!(updated["name"], "Plain");
    assert_eq!(updated["roles"], json!(["USER"]));

    let deleted = app
        .server
        .delete("/v1/users/me/profile")
        .add_header("Authorization", user.clone())
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let after = app
        .server
        .get("/v1/users/me/profile")
        .add_header("Authorization", user)
        .await;
    assert_eq!(after.status_code(), StatusCode::UNAUTHORIZED);
}
