// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 分类查询条件
#[derive(Debug, Default, Clone)]
pub struct CategoryFilter {
    /// 名称包含（忽略大小写）
    pub name: Option<String>,
    /// 是否已逻辑删除
    pub is_deleted: Option<bool>,
}

/// 分类仓库特质
///
/// 定义分类数据访问接口
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// 按条件分页查询分类
    async fn find_all(
        &self,
        filter: CategoryFilter,
        page: &PageRequest,
    ) -> Result<Page<Category>, RepositoryError>;
    /// 根据ID查找分类
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError>;
    /// 根据名称查找分类（忽略大小写）
    async fn find_by_name_ignore_case(&self, name: &str)
        -> Result<Option<Category>, RepositoryError>;
    /// 保存分类，ID为空时插入，否则更新
    async fn save(&self, category: &Category) -> Result<Category, RepositoryError>;
    /// 根据ID删除分类
    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;
    /// 检查是否有商品引用该分类
    async fn exists_product_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
    /// 将分类标记为已删除
    async fn update_is_deleted_to_true_by_id(&self, id: i64) -> Result<(), RepositoryError>;
}
