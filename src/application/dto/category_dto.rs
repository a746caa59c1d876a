// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// 创建或更新分类的请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 3, message = "Category name must have at least 3 characters"))]
    pub name: String,
    pub is_deleted: Option<bool>,
}

/// 分类列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct CategoryQuery {
    pub name: Option<String>,
    pub is_deleted: Option<bool>,
}
