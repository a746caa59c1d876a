// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;

/// 商品实体
///
/// 商品归属于一个分类，库存由订单服务预留和归还。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 商品ID，新建时为 None
    pub id: Option<i64>,
    /// 商品对外唯一标识
    pub uuid: Uuid,
    /// 品牌
    pub brand: String,
    /// 型号
    pub model: String,
    /// 描述
    pub description: String,
    /// 单价
    pub price: f64,
    /// 图片地址或存储文件名
    pub image: String,
    /// 库存数量
    pub stock: i32,
    /// 所属分类
    pub category: Category,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
    /// 是否已逻辑删除
    pub is_deleted: bool,
}

impl Product {
    /// 未上传图片时使用的默认图片
    pub const IMAGE_DEFAULT: &'static str = "https://via.placeholder.com/150";

    /// 图片是否为默认图片
    pub fn has_default_image(&self) -> bool {
        self.image == Self::IMAGE_DEFAULT
    }
}
