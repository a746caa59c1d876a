// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::auth_service::AuthService;
use crate::domain::services::categories_service::CategoriesService;
use crate::domain::services::orders_service::OrdersService;
use crate::domain::services::products_service::ProductsService;
use crate::domain::services::storage_service::StorageService;
use crate::domain::services::users_service::UsersService;
use crate::presentation::handlers::{
    auth_handler, category_handler, order_handler, product_handler, storage_handler, user_handler,
};
use crate::presentation::middleware::auth_middleware::{auth_middleware, require_admin};
use crate::websocket::{products_ws_handler, ConnectionManager};
use axum::{
    middleware,
    routing::{get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 路由依赖的全部服务
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<CategoriesService>,
    pub products: Arc<ProductsService>,
    pub orders: Arc<OrdersService>,
    pub users: Arc<UsersService>,
    pub auth: Arc<AuthService>,
    pub storage: Arc<StorageService>,
    pub ws_manager: Arc<ConnectionManager>,
}

/// 创建应用路由
///
/// 路由分为公开、登录用户和管理员三组，后两组依次经过认证和角色校验
///
/// # 返回值
///
/// 返回配置好的路由
pub fn create_router(services: AppServices) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/v1/auth/signup", post(auth_handler::sign_up))
        .route("/v1/auth/signin", post(auth_handler::sign_in))
        .route("/v1/categories", get(category_handler::list))
        .route("/v1/categories/{id}", get(category_handler::get_by_id))
        .route("/v1/products", get(product_handler::list))
        .route("/v1/products/{id}", get(product_handler::get_by_id))
        .route("/v1/products/uuid/{uuid}", get(product_handler::get_by_uuid))
        .route("/storage/{filename}", get(storage_handler::serve))
        .route("/ws/v1/products", get(products_ws_handler));

    let user_routes = Router::new()
        .route(
            "/v1/users/me/profile",
            get(user_handler::me_profile)
                .put(user_handler::update_me)
                .delete(user_handler::delete_me),
        )
        .route(
            "/v1/users/me/orders",
            get(user_handler::my_orders).post(user_handler::create_my_order),
        )
        .route(
            "/v1/users/me/orders/{id}",
            get(user_handler::my_order)
                .put(user_handler::update_my_order)
                .delete(user_handler::delete_my_order),
        )
        .route_layer(middleware::from_fn_with_state(
            services.auth.clone(),
            auth_middleware,
        ));

    let admin_routes = Router::new()
        .route("/v1/categories", post(category_handler::create))
        .route(
            "/v1/categories/{id}",
            put(category_handler::update).delete(category_handler::delete),
        )
        .route("/v1/products", post(product_handler::create))
        .route(
            "/v1/products/{id}",
            put(product_handler::update)
                .patch(product_handler::update)
                .delete(product_handler::delete),
        )
        .route(
            "/v1/products/{id}/image",
            patch(product_handler::update_image),
        )
        .route(
            "/v1/orders",
            get(order_handler::list).post(order_handler::create),
        )
        .route(
            "/v1/orders/{id}",
            get(order_handler::get_by_id)
                .put(order_handler::update)
                .delete(order_handler::delete),
        )
        .route("/v1/orders/user/{user_id}", get(order_handler::list_by_user))
        .route(
            "/v1/users",
            get(user_handler::list).post(user_handler::create),
        )
        .route(
            "/v1/users/{id}",
            get(user_handler::get_by_id)
                .put(user_handler::update)
                .delete(user_handler::delete),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            services.auth.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(Extension(services.categories))
        .layer(Extension(services.products))
        .layer(Extension(services.orders))
        .layer(Extension(services.users))
        .layer(Extension(services.auth))
        .layer(Extension(services.storage))
        .layer(Extension(services.ws_manager))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
