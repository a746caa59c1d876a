// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::{CacheBackend, DocumentStoreBackend, Settings};
use crate::domain::repositories::order_repository::OrderRepository;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::categories_service::CategoriesService;
use crate::domain::services::notifier::ProductNotifier;
use crate::domain::services::orders_service::OrdersService;
use crate::domain::services::products_service::ProductsService;
use crate::domain::services::storage_service::StorageService;
use crate::domain::services::users_service::UsersService;
use crate::infrastructure::cache::cache_manager::CacheManager;
use crate::infrastructure::cache::redis_client::RedisClient;
use crate::infrastructure::database::{connection, seed};
use crate::infrastructure::repositories::category_repo_impl::CategoryRepoImpl;
use crate::infrastructure::repositories::order_memory_repo::InMemoryOrderRepository;
use crate::infrastructure::repositories::order_redis_repo::RedisOrderRepository;
use crate::infrastructure::repositories::product_repo_impl::ProductRepoImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepoImpl;
use crate::infrastructure::storage::create_storage_repository;
use crate::presentation::routes::AppServices;
use crate::websocket::ConnectionManager;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// 按配置组装所有服务
///
/// 连接并迁移数据库，按需连接 Redis、写入演示数据并准备文件存储
pub async fn build_services(settings: &Settings) -> Result<AppServices> {
    let db = Arc::new(connection::connect_and_migrate(&settings.database).await?);
    info!("Database connection established");

    let needs_redis = settings.cache.backend != CacheBackend::Memory
        || settings.document_store.backend == DocumentStoreBackend::Redis;
    let redis_client = if needs_redis {
        let client = RedisClient::new(&settings.redis.url).await?;
        info!("Redis client initialized");
        Some(Arc::new(client))
    } else {
        None
    };

    if settings.database.seed_data {
        seed::seed_demo_data(db.clone()).await?;
    }

    let cache = Arc::new(CacheManager::new(&settings.cache, redis_client.clone())?);

    let order_repository: Arc<dyn OrderRepository> = match (
        settings.document_store.backend,
        redis_client,
    ) {
        (DocumentStoreBackend::Redis, Some(client)) => Arc::new(RedisOrderRepository::new(
            client,
            settings.document_store.key_prefix.clone(),
        )),
        _ => Arc::new(InMemoryOrderRepository::new()),
    };
    info!(
        "Order document store: {:?}",
        settings.document_store.backend
    );

    let storage = Arc::new(StorageService::new(
        create_storage_repository(&settings.storage)?,
        settings.server.base_url.clone(),
    ));
    if settings.storage.delete_all_on_start {
        storage.delete_all().await?;
    }
    storage.init().await?;

    let ws_manager = Arc::new(ConnectionManager::new());
    let product_repository = Arc::new(ProductRepoImpl::new(db.clone()));
    let user_repository = Arc::new(UserRepoImpl::new(db.clone()));

    let categories = Arc::new(CategoriesService::new(
        Arc::new(CategoryRepoImpl::new(db)),
        cache.clone(),
    ));
    let notifier: Arc<dyn ProductNotifier> = ws_manager.clone();
    let products = Arc::new(ProductsService::new(
        product_repository.clone(),
        categories.clone(),
        storage.clone(),
        notifier,
        cache.clone(),
    ));
    let orders = Arc::new(OrdersService::new(
        order_repository.clone(),
        product_repository,
        cache.clone(),
    ));
    let users = Arc::new(UsersService::new(
        user_repository.clone(),
        order_repository,
        cache,
    ));
    let auth = Arc::new(AuthService::new(user_repository, &settings.jwt));

    Ok(AppServices {
        categories,
        products,
        orders,
        users,
        auth,
        storage,
        ws_manager,
    })
}
