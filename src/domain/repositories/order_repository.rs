// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::order::Order;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 订单仓库特质
///
/// 订单以完整文档的形式保存，实现方可以是内存集合或 Redis
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// 分页查询所有订单
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Order>, RepositoryError>;
    /// 根据ID查找订单
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError>;
    /// 分页查询用户的订单
    async fn find_by_user_id(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Order>, RepositoryError>;
    /// 查询用户所有订单的ID
    async fn find_ids_by_user_id(&self, user_id: i64) -> Result<Vec<Uuid>, RepositoryError>;
    /// 用户是否存在订单
    async fn exists_by_user_id(&self, user_id: i64) -> Result<bool, RepositoryError>;
    /// 保存订单（存在则覆盖）
    async fn save(&self, order: &Order) -> Result<Order, RepositoryError>;
    /// 根据ID删除订单
    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// 文档排序允许的字段
pub const SORTABLE_FIELDS: [&str; 6] = [
    "id",
    "user_id",
    "total",
    "total_items",
    "created_at",
    "updated_at",
];

/// 按分页请求中的字段和方向对订单排序
///
/// 未知字段按 `created_at` 排序
pub fn sort_orders(orders: &mut [Order], page: &PageRequest) {
    use crate::domain::models::page::SortDirection;
    use std::cmp::Ordering;

    let field = if SORTABLE_FIELDS.contains(&page.sort_by.as_str()) {
        page.sort_by.as_str()
    } else {
        "created_at"
    };

    orders.sort_by(|a, b| {
        let ordering = match field {
            "id" => a.id.cmp(&b.id),
            "user_id" => a.user_id.cmp(&b.user_id),
            "total" => a.total.partial_cmp(&b.total).unwrap_or(Ordering::Equal),
            "total_items" => a.total_items.cmp(&b.total_items),
            "updated_at" => a.updated_at.cmp(&b.updated_at),
            _ => a.created_at.cmp(&b.created_at),
        };
        match page.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
