// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::product_dto::ProductResponse;
use crate::domain::models::notification::{Notification, NotificationType};
use crate::domain::models::product::Product;
use crate::domain::services::notifier::ProductNotifier;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::messages::{WsMessage, PRODUCTS_ENTITY};

/// WebSocket 发送通道
pub type WsSender = mpsc::UnboundedSender<WsMessage>;

/// 连接ID
pub type ConnectionId = u64;

/// WebSocket 连接管理器
///
/// 使用 DashMap 保存每个连接的发送端，发送失败的连接会被移除
pub struct ConnectionManager {
    connections: DashMap<ConnectionId, WsSender>,
    next_conn_id: AtomicU64,
}

impl ConnectionManager {
    /// 创建新的连接管理器
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            next_conn_id: AtomicU64::new(1),
        }
    }

    /// 注册连接并返回其ID
    pub fn add_connection(&self, tx: WsSender) -> ConnectionId {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(conn_id, tx);
        info!(
            conn_id,
            total_connections = self.connections.len(),
            "WebSocket connection added"
        );
        conn_id
    }

    /// 移除连接
    pub fn remove_connection(&self, conn_id: ConnectionId) {
        if self.connections.remove(&conn_id).is_some() {
            info!(
                conn_id,
                remaining_connections = self.connections.len(),
                "WebSocket connection removed"
            );
        }
    }

    /// 向所有连接广播消息，返回成功投递的数量
    pub fn broadcast(&self, message: WsMessage) -> usize {
        let mut dead = Vec::new();
        let mut delivered = 0;

        for entry in self.connections.iter() {
            if entry.value().send(message.clone()).is_ok() {
                delivered += 1;
            } else {
                dead.push(*entry.key());
            }
        }

        for conn_id in dead {
            debug!(conn_id, "Pruning disconnected WebSocket client");
            self.connections.remove(&conn_id);
        }
        delivered
    }

    /// 当前连接数
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductNotifier for ConnectionManager {
    fn notify(&self, notification_type: NotificationType, product: &Product) {
        let notification = Notification::new(
            PRODUCTS_ENTITY,
            notification_type,
            ProductResponse::from(product),
        );
        let delivered = self.broadcast(WsMessage::Product(notification));
        debug!(
            ?notification_type,
            product_id = ?product.id,
            delivered,
            "Product notification broadcast"
        );
    }
}
