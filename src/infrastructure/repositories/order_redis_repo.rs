// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::order::Order;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::repositories::order_repository::{sort_orders, OrderRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::cache::redis_client::RedisClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Redis 订单仓库
///
/// 每个订单以 JSON 文档保存在 `{prefix}:{id}`，
/// 并维护全部订单的集合 `{prefix}:ids` 与每个用户的集合 `{prefix}:user:{user_id}`
pub struct RedisOrderRepository {
    redis_client: Arc<RedisClient>,
    prefix: String,
}

impl RedisOrderRepository {
    /// 创建新的 Redis 订单仓库
    pub fn new(redis_client: Arc<RedisClient>, prefix: impl Into<String>) -> Self {
        Self {
            redis_client,
            prefix: prefix.into(),
        }
    }

    fn document_key(&self, id: Uuid) -> String {
        format!("{}:{}", self.prefix, id)
    }

    fn ids_key(&self) -> String {
        format!("{}:ids", self.prefix)
    }

    fn user_key(&self, user_id: i64) -> String {
        format!("{}:user:{}", self.prefix, user_id)
    }

    async fn load_documents(&self, set_key: &str) -> Result<Vec<Order>, RepositoryError> {
        let ids = self.redis_client.smembers(set_key).await.map_err(document_error)?;
        let keys: Vec<String> = ids.iter().map(|id| format!("{}:{}", self.prefix, id)).collect();
        let documents = self
            .redis_client
            .get_many(&keys)
            .await
            .map_err(document_error)?;

        let mut orders = Vec::with_capacity(documents.len());
        for (key, document) in keys.iter().zip(documents) {
            match document {
                Some(json) => orders.push(serde_json::from_str(&json)?),
                None => warn!("Order index references missing document {}", key),
            }
        }
        Ok(orders)
    }
}

fn document_error(err: anyhow::Error) -> RepositoryError {
    RepositoryError::Document(err.to_string())
}

#[async_trait]
impl OrderRepository for RedisOrderRepository {
    async fn find_all(&self, page: &PageRequest) -> Result<Page<Order>, RepositoryError> {
        let mut orders = self.load_documents(&self.ids_key()).await?;
        sort_orders(&mut orders, page);
        Ok(Page::from_sorted(orders, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, RepositoryError> {
        let document = self
            .redis_client
            .get(&self.document_key(id))
            .await
            .map_err(document_error)?;

        match document {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn find_by_user_id(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Order>, RepositoryError> {
        let mut orders = self.load_documents(&self.user_key(user_id)).await?;
        sort_orders(&mut orders, page);
        Ok(Page::from_sorted(orders, page))
    }

    async fn find_ids_by_user_id(&self, user_id: i64) -> Result<Vec<Uuid>, RepositoryError> {
        let members = self
            .redis_client
            .smembers(&self.user_key(user_id))
            .await
            .map_err(document_error)?;

        Ok(members
            .iter()
            .filter_map(|member| Uuid::parse_str(member).ok())
            .collect())
    }

    async fn exists_by_user_id(&self, user_id: i64) -> Result<bool, RepositoryError> {
        let count = self
            .redis_client
            .scard(&self.user_key(user_id))
            .await
            .map_err(document_error)?;
        Ok(count > 0)
    }

    async fn save(&self, order: &Order) -> Result<Order, RepositoryError> {
        // An update may move the order to another user
        if let Some(previous) = self.find_by_id(order.id).await? {
            if previous.user_id != order.user_id {
                self.redis_client
                    .srem(&self.user_key(previous.user_id), &order.id.to_string())
                    .await
                    .map_err(document_error)?;
            }
        }

        let json = serde_json::to_string(order)?;
        let id = order.id.to_string();
        self.redis_client
            .set_forever(&self.document_key(order.id), &json)
            .await
            .map_err(document_error)?;
        self.redis_client
            .sadd(&self.ids_key(), &id)
            .await
            .map_err(document_error)?;
        self.redis_client
            .sadd(&self.user_key(order.user_id), &id)
            .await
            .map_err(document_error)?;

        Ok(order.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), RepositoryError> {
        let Some(order) = self.find_by_id(id).await? else {
            return Ok(());
        };

        let member = id.to_string();
        self.redis_client
            .del(&self.document_key(id))
            .await
            .map_err(document_error)?;
        self.redis_client
            .srem(&self.ids_key(), &member)
            .await
            .map_err(document_error)?;
        self.redis_client
            .srem(&self.user_key(order.user_id), &member)
            .await
            .map_err(document_error)?;
        Ok(())
    }
}
