// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::create_test_app;
use axum::http::{header, StatusCode};
use axum_test::multipart::{MultipartForm, Part};
use serde_json::{json, Value};
use storefront::domain::models::notification::NotificationType;
use storefront::websocket::messages::WsMessage;
use tokio::sync::mpsc;

fn count(body: &Value) -> usize {
    body.as_array().map(Vec::len).unwrap_or_default()
}

/// 品牌与分类过滤组合
#[tokio::test]
async fn list_products_with_filters() {
    let app = create_test_app().await;

    let all = app.server.get("/v1/products").await;
    assert_eq!(all.status_code(), StatusCode::OK);
    assert_eq!(count(&all.json::<Value>()), 5);

    let by_brand = app.server.get("/v1/products?brand=ADI").await.json::<Value>();
    assert_eq!(count(&by_brand), 1);
    assert_eq!(by_brand[0]["brand"], "Adidas");

    let by_category = app.server.get("/v1/products?category=sport").await.json::<Value>();
    assert_eq!(count(&by_category), 2);

    let both = app
        .server
        .get("/v1/products?brand=nike&category=sports")
        .await
        .json::<Value>();
    assert_eq!(count(&both), 1);
    assert_eq!(both[0]["category"], "SPORTS");

    // With a brand the category name must match exactly
    let partial_category = app
        .server
        .get("/v1/products?brand=nike&category=sport")
        .await
        .json::<Value>();
    assert_eq!(count(&partial_category), 0);

    let blank = app.server.get("/v1/products?brand=%20&category=").await.json::<Value>();
    assert_eq!(count(&blank), 5);
}

/// 按ID和UUID查询
#[tokio::test]
async fn get_product_by_id_and_uuid() {
    let app = create_test_app().await;

    let product = app.server.get("/v1/products/1").await.json::<Value>();
    assert_eq!(product["brand"], "Adidas");
    let uuid = product["uuid"].as_str().unwrap().to_string();

    let by_uuid = app.server.get(&format!("/v1/products/uuid/{}", uuid)).await;
    assert_eq!(by_uuid.status_code(), StatusCode::OK);
    assert_eq!(by_uuid.json::<Value>()["id"], 1);

    let bad_uuid = app.server.get("/v1/products/uuid/not-a-uuid").await;
    assert_eq!(bad_uuid.status_code(), StatusCode::BAD_REQUEST);

    let unknown_uuid = app
        .server
        .get("/v1/products/uuid/00000000-0000-4000-8000-000000000000")
        .await;
    assert_eq!(unknown_uuid.status_code(), StatusCode::NOT_FOUND);

    let unknown_id = app.server.get("/v1/products/999").await;
    assert_eq!(unknown_id.status_code(), StatusCode::NOT_FOUND);
}

/// 列表的 XML 输出中每个商品为一个 item 元素
#[tokio::test]
async fn products_list_as_xml() {
    let app = create_test_app().await;

    let body = app
        .server
        .get("/v1/products?brand=apple")
        .add_header("Accept", "application/xml")
        .await
        .text();
    assert!(body.starts_with("<products><item>"));
    assert!(body.contains("<brand>Apple</brand>"));
    assert_eq!(body.matches("<item>").count(), 1);
}

/// 创建、部分更新和删除商品
#[tokio::test]
async fn product_lifecycle() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let created = app
        .server
        .post("/v1/products")
        .add_header("Authorization", admin.clone())
        .json(&json!({
            "brand": "Puma",
            "model": "Socks",
            "description": "Running socks",
            "price": 9.99,
            "stock": 20,
            "category": "sports"
        }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    let body = created.json::<Value>();
    let id = body["id"].as_i64().unwrap();
    assert_eq!(body["category"], "SPORTS");
    assert_eq!(body["image"], "https://via.placeholder.com/150");
    assert!(body["uuid"].is_string());

    let unknown_category = app
        .server
        .post("/v1/products")
        .add_header("Authorization", admin.clone())
        .json(&json!({
            "brand": "Puma",
            "model": "Socks",
            "description": "Running socks",
            "price": 9.99,
            "stock": 20,
            "category": "GARDEN"
        }))
        .await;
    assert_eq!(unknown_category.status_code(), StatusCode::NOT_FOUND);

    let invalid = app
        .server
        .post("/v1/products")
        .add_header("Authorization", admin.clone())
        .json(&json!({
            "brand": " ",
            "model": "Socks",
            "description": "Running socks",
            "price": -1.0,
            "stock": 20,
            "category": "SPORTS"
        }))
        .await;
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    let errors = &invalid.json::<Value>()["errors"];
    assert!(errors["brand"].is_array());
    assert!(errors["price"].is_array());

    // Warm the cache before the update
    app.server.get(&format!("/v1/products/{}", id)).await;

    let patched = app
        .server
        .patch(&format!("/v1/products/{}", id))
        .add_header("Authorization", admin.clone())
        .json(&json!({ "price": 12.5, "category": "OTHERS" }))
        .await;
    assert_eq!(patched.status_code(), StatusCode::OK);
    let body = patched.json::<Value>();
    assert_eq!(body["price"], 12.5);
    assert_eq!(body["brand"], "Puma");
    assert_eq!(body["category"], "OTHERS");

    let fetched = app.server.get(&format!("/v1/products/{}", id)).await.json::<Value>();
    assert_eq!(fetched["price"], 12.5);

    let deleted = app
        .server
        .delete(&format!("/v1/products/{}", id))
        .add_header("Authorization", admin)
        .await;
    assert_eq!(deleted.status_code(), StatusCode::NO_CONTENT);

    let missing = app.server.get(&format!("/v1/products/{}", id)).await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

/// 上传图片后可通过存储端点读取
#[tokio::test]
async fn upload_product_image() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"fake png".to_vec())
            .file_name("photo.png")
            .mime_type("image/png"),
    );
    let response = app
        .server
        .patch("/v1/products/2/image")
        .add_header("Authorization", admin.clone())
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let image = response.json::<Value>()["image"].as_str().unwrap().to_string();
    assert!(image.ends_with("_photo.png"));

    let stored = app.server.get(&format!("/storage/{}", image)).await;
    assert_eq!(stored.status_code(), StatusCode::OK);
    assert_eq!(stored.header(header::CONTENT_TYPE), "image/png");
    assert_eq!(stored.as_bytes().to_vec(), b"fake png".to_vec());

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"second".to_vec()).file_name("photo 2.jpg"),
    );
    let with_url = app
        .server
        .patch("/v1/products/2/image?with_url=true")
        .add_header("Authorization", admin.clone())
        .multipart(form)
        .await
        .json::<Value>();
    let url = with_url["image"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:3000/storage/"));
    assert!(url.ends_with("_photo_2.jpg"));

    // The replaced image is removed from storage
    let previous = app.server.get(&format!("/storage/{}", image)).await;
    assert_eq!(previous.status_code(), StatusCode::NOT_FOUND);

    let no_file = app
        .server
        .patch("/v1/products/2/image")
        .add_header("Authorization", admin)
        .multipart(MultipartForm::new().add_text("other", "value"))
        .await;
    assert_eq!(no_file.status_code(), StatusCode::BAD_REQUEST);
}

/// 商品变更推送给所有连接
#[tokio::test]
async fn product_changes_are_broadcast() {
    let app = create_test_app().await;
    let admin = app.admin().await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    app.services.ws_manager.add_connection(tx);

    app.server
        .put("/v1/products/3")
        .add_header("Authorization", admin.clone())
        .json(&json!({ "stock": 7 }))
        .await;
    app.server
        .delete("/v1/products/3")
        .add_header("Authorization", admin)
        .await;

    let update = rx.try_recv().expect("update notification");
    let delete = rx.try_recv().expect("delete notification");
    match (update, delete) {
        (WsMessage::Product(update), WsMessage::Product(delete)) => {
            assert_eq!(update.entity, "PRODUCTS");
            assert_eq!(update.notification_type, NotificationType::Update);
            assert_eq!(update.data.stock, 7);
            assert_eq!(delete.notification_type, NotificationType::Delete);
            assert_eq!(delete.data.id, 3);
        }
        other => panic!("unexpected messages: {:?}", other),
    }
}
