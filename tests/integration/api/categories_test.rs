// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::create_test_app;
use axum::http::{header, StatusCode};
use serde_json::{json, Value};

/// 分页查询返回完整的分页信息
#[tokio::test]
async fn list_categories_returns_page() {
    let app = create_test_app().await;

    let response = app.server.get("/v1/categories").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let page = response.json::<Value>();
    assert_eq!(page["total_elements"], 5);
    assert_eq!(page["total_page_elements"], 5);
    assert_eq!(page["page_size"], 10);
    assert_eq!(page["page_number"], 0);
    assert_eq!(page["first"], true);
    assert_eq!(page["last"], true);
    assert_eq!(page["sort_by"], "id");
    assert_eq!(page["direction"], "asc");
    assert_eq!(page["content"][0]["name"], "SPORTS");

    let second = app
        .server
        .get("/v1/categories?page=1&size=2&sort_by=name&direction=desc")
        .await
        .json::<Value>();
    assert_eq!(second["total_pages"], 3);
    assert_eq!(second["content"].as_array().unwrap().len(), 2);
    assert_eq!(second["first"], false);
    assert_eq!(second["content"][0]["name"], "FOOD");

    let filtered = app
        .server
        .get("/v1/categories?name=sp")
        .await
        .json::<Value>();
    assert_eq!(filtered["total_elements"], 1);
    assert_eq!(filtered["content"][0]["name"], "SPORTS");
}

/// 超大页码返回空页
#[tokio::test]
async fn huge_page_number_returns_empty_page() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let response = app
        .server
        .get(&format!("/v1/categories?page={}", u64::MAX))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let page = response.json::<Value>();
    assert_eq!(page["empty"], true);
    assert_eq!(page["total_elements"], 5);
    assert_eq!(page["last"], true);

    let users = app
        .server
        .get(&format!("/v1/users?page={}&size=100", u64::MAX))
        .add_header("Authorization", admin.clone())
        .await;
    assert_eq!(users.status_code(), StatusCode::OK);

    let orders = app
        .server
        .get(&format!("/v1/orders?page={}", u64::MAX))
        .add_header("Authorization", admin)
        .await;
    assert_eq!(orders.status_code(), StatusCode::OK);
    assert_eq!(orders.json::<Value>()["empty"], true);
}

/// 请求 XML 时以资源名为根元素
#[tokio::test]
async fn categories_negotiate_xml() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/v1/categories/1")
        .add_header("Accept", "application/xml")
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(response
        .header(header::CONTENT_TYPE)
        .to_str()
        .unwrap()
        .contains("xml"));
    let body = response.text();
    assert!(body.starts_with("<category>"));
    assert!(body.contains("<name>SPORTS</name>"));

    let list = app
        .server
        .get("/v1/categories")
        .add_header("Accept", "application/xml")
        .await
        .text();
    assert!(list.starts_with("<categories>"));
}

/// 分类增删改的业务规则
#[tokio::test]
async fn category_crud_rules() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let created = app
        .server
        .post("/v1/categories")
        .add_header("Authorization", admin.clone())
        .json(&json!({ "name": "TOYS" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let id = created.json::<Value>()["id"].as_i64().unwrap();

    let duplicate = app
        .server
        .post("/v1/categories")
        .add_header("Authorization", admin.clone())
        .json(&json!({ "name": "toys" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let too_short = app
        .server
        .post("/v1/categories")
        .add_header("Authorization", admin.clone())
        .json(&json!({ "name": "ab" }))
        .await;
    assert_eq!(too_short.status_code(), StatusCode::BAD_REQUEST);

    let taken_name = app
        .server
        .put(&format!("/v1/categories/{}", id))
        .add_header("Authorization", admin.clone())
        .json(&json!({ "name": "Food" }))
        .await;
    assert_eq!(taken_name.status_code(), StatusCode::CONFLICT);

    let renamed = app
        .server
        .put(&format!("/v1/categories/{}", id))
        .add_header("Authorization", admin.clone())
        .json(&json!({ "name": "GAMES", "is_deleted": true }))
        .await;
    assert_eq!(renamed.status_code(), StatusCode::OK);
    let body = renamed.json::<Value>();
    assert_eq!(body["name"], "GAMES");
    assert_eq!(body["is_deleted"], true);

    // The cached entry follows the update
    let fetched = app
        .server
        .get(&format!("/v1/categories/{}", id))
        .await
        .json::<Value>();
    assert_eq!(fetched["name"], "GAMES");

    let in_use = app
        .server
        .delete("/v1/categories/1")
        .add_header("Authorization", admin.clone())
        .await;
    assert_eq!(in_use.status_code(), StatusCode::CONFLICT);

    let deleted = app
        .server
        .delete(&format!("/v1/categories/{}", id))
        .add_header("Authorization", admin)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = app.server.get(&format!("/v1/categories/{}", id)).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    assert!(missing.json::<Value>()["error"].is_string());
}

/// 普通用户不能修改分类
#[tokio::test]
async fn users_cannot_create_categories() {
    let app = create_test_app().await;
    let user = app.user().await;

    let response = app
        .server
        .post("/v1/categories")
        .add_header("Authorization", user)
        .json(&json!({ "name": "TOYS" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let anonymous = app
        .server
        .post("/v1/categories")
        .json(&json!({ "name": "TOYS" }))
        .await;
    assert_eq!(anonymous.status_code(), StatusCode::UNAUTHORIZED);
}
