// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::product::Product;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 商品仓库特质
///
/// 定义商品数据访问接口，所有名称匹配均忽略大小写
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 查询所有商品
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;
    /// 品牌包含指定字符串的商品
    async fn find_by_brand_contains_ignore_case(
        &self,
        brand: &str,
    ) -> Result<Vec<Product>, RepositoryError>;
    /// 分类名称包含指定字符串的商品
    async fn find_by_category_contains_ignore_case(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError>;
    /// 品牌包含指定字符串且分类名称相等的商品
    async fn find_by_brand_contains_and_category_ignore_case(
        &self,
        brand: &str,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError>;
    /// 根据ID查找商品
    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;
    /// 根据UUID查找商品
    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Product>, RepositoryError>;
    /// 检查商品是否存在
    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError>;
    /// 保存商品，ID为空时插入，否则更新
    async fn save(&self, product: &Product) -> Result<Product, RepositoryError>;
    /// 根据ID删除商品
    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;
    /// 将商品标记为已删除
    async fn update_is_deleted_to_true_by_id(&self, id: i64) -> Result<(), RepositoryError>;
}
