// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{create_test_app, order_body, TestApp};
use axum::http::StatusCode;
use serde_json::{json, Value};

async fn stock_of(app: &TestApp, product_id: i64) -> i64 {
    app.server
        .get(&format!("/v1/products/{}", product_id))
        .await
        .json::<Value>()["stock"]
        .as_i64()
        .unwrap()
}

/// 创建订单会预留库存并计算合计
#[tokio::test]
async fn create_order_reserves_stock() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let response = app
        .server
        .post("/v1/orders")
        .add_header("Authorization", admin.clone())
        .json(&order_body(2, &[(1, 2, 100.0), (4, 10, 1.5)]))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let order = response.json::<Value>();
    assert_eq!(order["user_id"], 2);
    assert_eq!(order["total_items"], 12);
    assert_eq!(order["total"], 215.0);
    assert_eq!(order["lines"][0]["total"], 200.0);

    assert_eq!(stock_of(&app, 1).await, 3);
    assert_eq!(stock_of(&app, 4).await, 90);

    let id = order["id"].as_str().unwrap();
    let fetched = app
        .server
        .get(&format!("/v1/orders/{}", id))
        .add_header("Authorization", admin.clone())
        .await;
    assert_eq!(fetched.status_code(), StatusCode::OK);
    assert_eq!(fetched.json::<Value>()["customer"]["address"]["city"], "Madrid");

    let by_user = app
        .server
        .get("/v1/orders/user/2")
        .add_header("Authorization", admin.clone())
        .await
        .json::<Value>();
    assert_eq!(by_user["total_elements"], 1);

    let all = app
        .server
        .get("/v1/orders?sort_by=total&direction=desc")
        .add_header("Authorization", admin)
        .await
        .json::<Value>();
    assert_eq!(all["total_elements"], 1);
    assert_eq!(all["sort_by"], "total");
}

/// 订单校验规则
#[tokio::test]
async fn order_checks() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let cases = [
        (order_body(2, &[(3, 3, 1000.0)]), StatusCode::BAD_REQUEST),
        (order_body(2, &[(3, 1, 999.0)]), StatusCode::BAD_REQUEST),
        (order_body(2, &[(99, 1, 1.0)]), StatusCode::NOT_FOUND),
        (order_body(2, &[]), StatusCode::BAD_REQUEST),
        // Two lines of the same product share its stock
        (
            order_body(2, &[(3, 2, 1000.0), (3, 1, 1000.0)]),
            StatusCode::BAD_REQUEST,
        ),
    ];

    for (body, expected) in cases {
        let response = app
            .server
            .post("/v1/orders")
            .add_header("Authorization", admin.clone())
            .json(&body)
            .await;
        assert_eq!(response.status_code(), expected, "{}", body);
    }

    assert_eq!(stock_of(&app, 3).await, 2);
}

/// 更新订单先归还旧库存，删除订单归还全部库存
#[tokio::test]
async fn update_and_delete_order_return_stock() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let order = app
        .server
        .post("/v1/orders")
        .add_header("Authorization", admin.clone())
        .json(&order_body(2, &[(1, 5, 100.0)]))
        .await
        .json::<Value>();
    let id = order["id"].as_str().unwrap().to_string();
    assert_eq!(stock_of(&app, 1).await, 0);

    let updated = app
        .server
        .put(&format!("/v1/orders/{}", id))
        .add_header("Authorization", admin.clone())
        .json(&order_body(2, &[(1, 1, 100.0), (2, 2, 50.0)]))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json::<Value>()["total"], 200.0);
    assert_eq!(stock_of(&app, 1).await, 4);
    assert_eq!(stock_of(&app, 2).await, 8);

    let rejected = app
        .server
        .put(&format!("/v1/orders/{}", id))
        .add_header("Authorization", admin.clone())
        .json(&order_body(2, &[(1, 6, 100.0)]))
        .await;
    assert_eq!(rejected.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(stock_of(&app, 1).await, 4);

    let deleted = app
        .server
        .delete(&format!("/v1/orders/{}", id))
        .add_header("Authorization", admin.clone())
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(stock_of(&app, 1).await, 5);
    assert_eq!(stock_of(&app, 2).await, 10);

    let missing = app
        .server
        .get(&format!("/v1/orders/{}", id))
        .add_header("Authorization", admin)
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

/// 用户只能看到和修改自己的订单
#[tokio::test]
async fn my_orders_are_owner_scoped() {
    let app = create_test_app().await;
    let admin = app.admin().await;
    let user = app.user().await;

    // The body user id is replaced by the caller's
    let mine = app
        .server
        .post("/v1/users/me/orders")
        .add_header("Authorization", user.clone())
        .json(&order_body(1, &[(2, 1, 50.0)]))
        .await;
    assert_eq!(mine.status_code(), StatusCode::CREATED);
    let mine = mine.json::<Value>();
    assert_eq!(mine["user_id"], 2);
    let mine_id = mine["id"].as_str().unwrap().to_string();

    let admins = app
        .server
        .post("/v1/orders")
        .add_header("Authorization", admin)
        .json(&order_body(1, &[(2, 1, 50.0)]))
        .await
        .json::<Value>();
    let admins_id = admins["id"].as_str().unwrap().to_string();

    let listed = app
        .server
        .get("/v1/users/me/orders")
        .add_header("Authorization", user.clone())
        .await
        .json::<Value>();
    assert_eq!(listed["total_elements"], 1);
    assert_eq!(listed["content"][0]["id"], json!(mine_id));

    let foreign = app
        .server
        .get(&format!("/v1/users/me/orders/{}", admins_id))
        .add_header("Authorization", user.clone())
        .await;
    assert_eq!(foreign.status_code(), StatusCode::NOT_FOUND);

    let foreign_delete = app
        .server
        .delete(&format!("/v1/users/me/orders/{}", admins_id))
        .add_header("Authorization", user.clone())
        .await;
    assert_eq!(foreign_delete.status_code(), StatusCode::NOT_FOUND);

    let updated = app
        .server
        .put(&format!("/v1/users/me/orders/{}", mine_id))
        .add_header("Authorization", user.clone())
        .json(&order_body(1, &[(2, 3, 50.0)]))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    assert_eq!(updated.json::<Value>()["total_items"], 3);

    let deleted = app
        .server
        .delete(&format!("/v1/users/me/orders/{}", mine_id))
        .add_header("Authorization", user)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);
}
