// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use storefront::app;
use storefront::config::settings::Settings;
use storefront::presentation::routes::{self, AppServices};
use tempfile::TempDir;

/// 演示数据中管理员与普通用户的密码
pub const DEMO_PASSWORD: &str = "password";

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub services: AppServices,
    pub settings: Settings,
    // Keep the storage directory alive
    pub storage_dir: TempDir,
}

impl TestApp {
    /// 以指定用户登录并返回 Authorization 头的值
    pub async fn bearer(&self, username: &str) -> String {
        let response = self
            .server
            .post("/v1/auth/signin")
            .json(&json!({ "username": username, "password": DEMO_PASSWORD }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let token = response.json::<Value>()["token"]
            .as_str()
            .expect("token in sign in response")
            .to_string();
        format!("Bearer {}", token)
    }

    pub async fn admin(&self) -> String {
        self.bearer("admin").await
    }

    pub async fn user(&self) -> String {
        self.bearer("user").await
    }
}

/// 创建带演示数据的测试应用
pub async fn create_test_app() -> TestApp {
    create_test_app_with(|_| {}).await
}

/// 创建测试应用，可在启动前修改配置
pub async fn create_test_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");

    let mut settings = Settings::defaults().expect("Failed to load default settings");
    settings.database.url = "sqlite::memory:".to_string();
    settings.database.seed_data = true;
    settings.storage.storage_type = "local".to_string();
    settings.storage.local_path = Some(storage_dir.path().to_string_lossy().into_owned());
    settings.server.base_url = "http://localhost:3000".to_string();
    customize(&mut settings);

    let services = app::build_services(&settings)
        .await
        .expect("Failed to build services");
    let server = TestServer::new(routes::create_router(services.clone()))
        .expect("Failed to start test server");

    TestApp {
        server,
        services,
        settings,
        storage_dir,
    }
}

/// 合法的订单请求体
pub fn order_body(user_id: i64, lines: &[(i64, i32, f64)]) -> Value {
    json!({
        "user_id": user_id,
        "customer": {
            "full_name": "Jane Doe",
            "email": "jane@example.com",
            "phone": "600000000",
            "address": {
                "street": "Main Street",
                "number": "1",
                "city": "Madrid",
                "province": "Madrid",
                "country": "Spain",
                "postal_code": "28001"
            }
        },
        "lines": lines
            .iter()
            .map(|(product_id, quantity, price)| json!({
                "product_id": product_id,
                "quantity": quantity,
                "product_price": price
            }))
            .collect::<Vec<_>>()
    })
}
