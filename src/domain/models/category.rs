// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 商品分类实体
///
/// 分类名称在系统内唯一（忽略大小写），被商品引用时不可删除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// 分类ID，新建时为 None
    pub id: Option<i64>,
    /// 分类名称
    pub name: String,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
    /// 是否已逻辑删除
    pub is_deleted: bool,
}

impl Category {
    /// 创建一个尚未持久化的分类
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            name: name.into(),
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }
}
