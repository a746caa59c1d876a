// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NotificationType {
    Create,
    Update,
    Delete,
}

/// 实体变更通知
///
/// 通过实时通道推送给所有已连接的客户端。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification<T> {
    /// 实体名称，如 `PRODUCTS`
    pub entity: String,
    /// 变更类型
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    /// 变更后的数据
    pub data: T,
    /// 通知产生时间
    pub created_at: DateTime<Utc>,
}

impl<T> Notification<T> {
    pub fn new(entity: impl Into<String>, notification_type: NotificationType, data: T) -> Self {
        Self {
            entity: entity.into(),
            notification_type,
            data,
            created_at: Utc::now(),
        }
    }
}
