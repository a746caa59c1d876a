// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::order::Order;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::repositories::order_repository::{sort_orders, OrderRepository};
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

/// 内存订单仓库
///
/// 订单文档保存在进程内的 `DashMap` 中，进程重启后丢失
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: DashMap<Uuid, Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect<F: Fn(&Order) -> bool>(&self, predicate: F) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Order>, RepositoryError> {
        let mut orders = self.collect(|_| true);
        sort_orders(&mut orders, page);
        Ok(Page::from_sorted(orders, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        Ok(self.orders.get(&id).map(|entry| entry.value().clone()))
    }

    async fn find_by_user_id(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Order>, RepositoryError> {
        let mut orders = self.collect(|order| order.user_id == user_id);
        sort_orders(&mut orders, page);
        Ok(Page::from_sorted(orders, page))
    }

    async fn find_ids_by_user_id(&self, user_id: i64) -> Result<Vec<Uuid>, RepositoryError> {
        Ok(self
            .collect(|order| order.user_id == user_id)
            .into_iter()
            .map(|order| order.id)
            .collect())
    }

    async fn exists_by_user_id(&self, user_id: i64) -> Result<bool, RepositoryError> {
        Ok(self
            .orders
            .iter()
            .any(|entry| entry.value().user_id == user_id))
    }

    async fn save(&self, order: &Order) -> Result<Order, RepositoryError> {
        self.orders.insert(order.id, order.clone());
        Ok(order.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.orders.remove(&id);
        Ok(())
    }
}
