// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::product_dto::{ProductCreateRequest, ProductUpdateRequest};
use crate::domain::models::notification::NotificationType;
use crate::domain::models::product::Product;
use crate::domain::repositories::product_repository::ProductRepository;
use crate::domain::repositories::storage_repository::StorageError;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::categories_service::{CategoriesService, CategoryError};
use crate::domain::services::notifier::ProductNotifier;
use crate::domain::services::storage_service::StorageService;
use crate::infrastructure::cache::cache_manager::{CacheManager, PRODUCTS_CACHE};
use chrono::Utc;
use metrics::counter;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// 商品服务错误
#[derive(Error, Debug)]
pub enum ProductError {
    /// 商品不存在
    #[error("{0}")]
    NotFound(String),
    /// UUID 格式错误
    #[error("Invalid product uuid: {0}")]
    BadUuid(String),
    /// 分类错误（如分类不存在）
    #[error(transparent)]
    Category(#[from] CategoryError),
    /// 图片存储错误
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 按UUID缓存商品时使用的键
fn uuid_key(uuid: Uuid) -> String {
    format!("uuid:{}", uuid)
}

/// 使商品在按ID和按UUID两个键下的缓存失效
pub async fn evict_product(cache: &CacheManager, product: &Product) {
    if let Some(id) = product.id {
        cache.evict(PRODUCTS_CACHE, id).await;
    }
    cache.evict(PRODUCTS_CACHE, uuid_key(product.uuid)).await;
}

/// 把空白字符串视为未提供
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 商品服务
///
/// 负责商品的查询与维护，每次变更都会推送通知并刷新缓存
pub struct ProductsService {
    repository: Arc<dyn ProductRepository>,
    categories: Arc<CategoriesService>,
    storage: Arc<StorageService>,
    notifier: Arc<dyn ProductNotifier>,
    cache: Arc<CacheManager>,
}

impl ProductsService {
    /// 创建新的商品服务实例
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        categories: Arc<CategoriesService>,
        storage: Arc<StorageService>,
        notifier: Arc<dyn ProductNotifier>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            repository,
            categories,
            storage,
            notifier,
            cache,
        }
    }

    /// 按品牌和分类查询商品
    ///
    /// 品牌按包含匹配；只给分类时分类名按包含匹配，两者都给时分类名需相等。
    /// 所有匹配都忽略大小写。
    pub async fn find_all(
        &self,
        brand: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<Product>, ProductError> {
        let products = match (non_blank(brand), non_blank(category)) {
            (None, None) => {
                info!("Finding all products");
                self.repository.find_all().await?
            }
            (Some(brand), None) => {
                info!("Finding products by brand: {}", brand);
                self.repository
                    .find_by_brand_contains_ignore_case(brand)
                    .await?
            }
            (None, Some(category)) => {
                info!("Finding products by category: {}", category);
                self.repository
                    .find_by_category_contains_ignore_case(category)
                    .await?
            }
            (Some(brand), Some(category)) => {
                info!(
                    "Finding products by brand: {} and category: {}",
                    brand, category
                );
                self.repository
                    .find_by_brand_contains_and_category_ignore_case(brand, category)
                    .await?
            }
        };
        Ok(products)
    }

    /// 根据ID查找商品
    pub async fn find_by_id(&self, id: i64) -> Result<Product, ProductError> {
        info!("Finding product by id: {}", id);
        if let Some(product) = self.cache.get::<Product>(PRODUCTS_CACHE, id).await {
            return Ok(product);
        }

        let product = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(format!("Product with id {} not found", id)))?;
        self.cache.put(PRODUCTS_CACHE, id, &product).await;
        Ok(product)
    }

    /// 根据UUID字符串查找商品
    pub async fn find_by_uuid(&self, uuid: &str) -> Result<Product, ProductError> {
        info!("Finding product by uuid: {}", uuid);
        let parsed =
            Uuid::parse_str(uuid).map_err(|_| ProductError::BadUuid(uuid.to_string()))?;

        if let Some(product) = self
            .cache
            .get::<Product>(PRODUCTS_CACHE, uuid_key(parsed))
            .await
        {
            return Ok(product);
        }

        let product = self
            .repository
            .find_by_uuid(parsed)
            .await?
            .ok_or_else(|| {
                ProductError::NotFound(format!("Product with uuid {} not found", parsed))
            })?;
        self.cache
            .put(PRODUCTS_CACHE, uuid_key(parsed), &product)
            .await;
        Ok(product)
    }

    /// 创建商品
    pub async fn save(&self, request: ProductCreateRequest) -> Result<Product, ProductError> {
        info!("Saving product: {} {}", request.brand, request.model);
        let category = self.categories.find_by_name(&request.category).await?;
        let now = Utc::now();

        let product = Product {
            id: None,
            uuid: Uuid::new_v4(),
            brand: request.brand,
            model: request.model,
            description: request.description,
            price: request.price,
            image: non_blank(request.image.as_deref())
                .unwrap_or(Product::IMAGE_DEFAULT)
                .to_string(),
            stock: request.stock,
            category,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };

        let saved = self.repository.save(&product).await?;
        self.after_change(NotificationType::Create, &saved).await;
        Ok(saved)
    }

    /// 部分更新商品
    pub async fn update(
        &self,
        id: i64,
        request: ProductUpdateRequest,
    ) -> Result<Product, ProductError> {
        info!("Updating product by id: {}", id);
        let mut current = self.find_by_id(id).await?;

        if let Some(category) = non_blank(request.category.as_deref()) {
            current.category = self.categories.find_by_name(category).await?;
        }
        if let Some(brand) = request.brand {
            current.brand = brand;
        }
        if let Some(model) = request.model {
            current.model = model;
        }
        if let Some(description) = request.description {
            current.description = description;
        }
        if let Some(price) = request.price {
            current.price = price;
        }
        if let Some(image) = non_blank(request.image.as_deref()) {
            current.image = image.to_string();
        }
        if let Some(stock) = request.stock {
            current.stock = stock;
        }
        if let Some(is_deleted) = request.is_deleted {
            current.is_deleted = is_deleted;
        }
        current.updated_at = Utc::now();

        let saved = self.repository.save(&current).await?;
        self.after_change(NotificationType::Update, &saved).await;
        Ok(saved)
    }

    /// 删除商品，非默认图片会一并删除
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ProductError> {
        debug!("Deleting product by id: {}", id);
        let product = self.find_by_id(id).await?;

        self.repository.delete_by_id(id).await?;

        if !product.has_default_image() {
            self.remove_stored_image(&product.image).await;
        }

        evict_product(&self.cache, &product).await;
        counter!("products_changed_total", "type" => "delete").increment(1);
        self.notifier.notify(NotificationType::Delete, &product);
        Ok(())
    }

    /// 更新商品图片
    ///
    /// `with_url` 为真时保存完整访问地址，否则只保存存储名
    pub async fn update_image(
        &self,
        id: i64,
        file_name: &str,
        data: &[u8],
        with_url: bool,
    ) -> Result<Product, ProductError> {
        info!("Updating image of product by id: {}", id);
        let mut current = self.find_by_id(id).await?;

        let stored = self.storage.store(file_name, data).await?;
        let image = if with_url {
            self.storage.url(&stored)
        } else {
            stored.clone()
        };
        let previous = std::mem::replace(&mut current.image, image);
        current.updated_at = Utc::now();

        let saved = self.repository.save(&current).await?;

        // A same-millisecond upload of the same name overwrites in place
        if self.storage.stored_name_of(&previous) != Some(stored.as_str()) {
            self.remove_stored_image(&previous).await;
        }

        self.after_change(NotificationType::Update, &saved).await;
        Ok(saved)
    }

    /// 删除图片对应的存储文件，外部地址不处理
    async fn remove_stored_image(&self, image: &str) {
        let Some(name) = self.storage.stored_name_of(image) else {
            debug!("Image {} is not kept in storage", image);
            return;
        };
        if let Err(e) = self.storage.delete(name).await {
            warn!("Failed to delete stored image {}: {}", name, e);
        }
    }

    async fn after_change(&self, notification_type: NotificationType, product: &Product) {
        if let Some(id) = product.id {
            self.cache.put(PRODUCTS_CACHE, id, product).await;
        }
        self.cache
            .put(PRODUCTS_CACHE, uuid_key(product.uuid), product)
            .await;

        let label = match notification_type {
            NotificationType::Create => "create",
            NotificationType::Update => "update",
            NotificationType::Delete => "delete",
        };
        counter!("products_changed_total", "type" => label).increment(1);
        self.notifier.notify(notification_type, product);
    }
}
