// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::category_dto::CategoryRequest;
use crate::domain::models::category::Category;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::repositories::category_repository::{CategoryFilter, CategoryRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::cache::cache_manager::{CacheManager, CATEGORIES_CACHE, PRODUCTS_CACHE};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// 分类服务错误
#[derive(Error, Debug)]
pub enum CategoryError {
    /// 分类不存在
    #[error("{0}")]
    NotFound(String),
    /// 名称冲突或分类仍被引用
    #[error("{0}")]
    Conflict(String),
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl CategoryError {
    fn not_found_id(id: i64) -> Self {
        CategoryError::NotFound(format!("Category with id {} not found", id))
    }
}

/// 分类服务
///
/// 分类名称忽略大小写唯一，按ID的查询结果会被缓存。
/// 商品缓存内嵌分类副本，分类变更时整体失效
pub struct CategoriesService {
    repository: Arc<dyn CategoryRepository>,
    cache: Arc<CacheManager>,
}

impl CategoriesService {
    /// 创建新的分类服务实例
    pub fn new(repository: Arc<dyn CategoryRepository>, cache: Arc<CacheManager>) -> Self {
        Self { repository, cache }
    }

    /// 按名称和删除状态分页查询分类
    pub async fn find_all(
        &self,
        name: Option<String>,
        is_deleted: Option<bool>,
        page: &PageRequest,
    ) -> Result<Page<Category>, CategoryError> {
        info!(
            "Finding categories with name: {:?} and is_deleted: {:?}",
            name, is_deleted
        );
        let filter = CategoryFilter {
            name: name.filter(|n| !n.trim().is_empty()),
            is_deleted,
        };
        Ok(self.repository.find_all(filter, page).await?)
    }

    /// 根据名称查找分类（忽略大小写）
    pub async fn find_by_name(&self, name: &str) -> Result<Category, CategoryError> {
        info!("Finding category by name: {}", name);
        self.repository
            .find_by_name_ignore_case(name)
            .await?
            .ok_or_else(|| CategoryError::NotFound(format!("Category {} not found", name)))
    }

    /// 根据ID查找分类
    pub async fn find_by_id(&self, id: i64) -> Result<Category, CategoryError> {
        info!("Finding category by id: {}", id);
        if let Some(category) = self.cache.get::<Category>(CATEGORIES_CACHE, id).await {
            return Ok(category);
        }

        let category = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CategoryError::not_found_id(id))?;
        self.cache.put(CATEGORIES_CACHE, id, &category).await;
        Ok(category)
    }

    /// 创建分类
    pub async fn save(&self, request: CategoryRequest) -> Result<Category, CategoryError> {
        info!("Saving category: {}", request.name);
        if self
            .repository
            .find_by_name_ignore_case(&request.name)
            .await?
            .is_some()
        {
            return Err(CategoryError::Conflict(format!(
                "A category named {} already exists",
                request.name
            )));
        }

        let mut category = Category::new(request.name);
        if let Some(is_deleted) = request.is_deleted {
            category.is_deleted = is_deleted;
        }

        let saved = self.repository.save(&category).await?;
        self.cache_result(&saved).await;
        Ok(saved)
    }

    /// 更新分类
    pub async fn update(
        &self,
        id: i64,
        request: CategoryRequest,
    ) -> Result<Category, CategoryError> {
        info!("Updating category {}: {}", id, request.name);
        let mut current = self.find_by_id(id).await?;

        if let Some(existing) = self
            .repository
            .find_by_name_ignore_case(&request.name)
            .await?
        {
            if existing.id != Some(id) {
                return Err(CategoryError::Conflict(format!(
                    "A category named {} already exists",
                    request.name
                )));
            }
        }

        let embedded_changed = current.name != request.name
            || request.is_deleted.is_some_and(|d| d != current.is_deleted);
        current.name = request.name;
        if let Some(is_deleted) = request.is_deleted {
            current.is_deleted = is_deleted;
        }
        current.updated_at = Utc::now();

        let saved = self.repository.save(&current).await?;
        self.cache_result(&saved).await;
        if embedded_changed {
            self.cache.evict_all(PRODUCTS_CACHE).await;
        }
        Ok(saved)
    }

    /// 删除分类
    ///
    /// 仍被商品引用的分类不能删除
    pub async fn delete_by_id(&self, id: i64) -> Result<(), CategoryError> {
        info!("Deleting category by id: {}", id);
        self.find_by_id(id).await?;

        if self.repository.exists_product_by_id(id).await? {
            warn!("Category {} still has products and cannot be deleted", id);
            return Err(CategoryError::Conflict(format!(
                "Category with id {} cannot be deleted because it has products",
                id
            )));
        }

        self.repository.delete_by_id(id).await?;
        self.cache.evict(CATEGORIES_CACHE, id).await;
        Ok(())
    }

    async fn cache_result(&self, category: &Category) {
        if let Some(id) = category.id {
            self.cache.put(CATEGORIES_CACHE, id, category).await;
        }
    }
}
