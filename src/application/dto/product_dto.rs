// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::application::dto::validation::not_blank;
use crate::domain::models::product::Product;

/// 创建商品的请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct ProductCreateRequest {
    #[validate(custom(function = "not_blank", message = "Brand must not be blank"))]
    pub brand: String,
    #[validate(custom(function = "not_blank", message = "Model must not be blank"))]
    pub model: String,
    #[validate(custom(function = "not_blank", message = "Description must not be blank"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price must be greater than or equal to 0"))]
    pub price: f64,
    pub image: Option<String>,
    #[validate(range(min = 0, message = "Stock must be greater than or equal to 0"))]
    pub stock: i32,
    #[validate(custom(function = "not_blank", message = "Category must not be blank"))]
    pub category: String,
}

/// 更新商品的请求，所有字段可选
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct ProductUpdateRequest {
    #[validate(custom(function = "not_blank", message = "Brand must not be blank"))]
    pub brand: Option<String>,
    #[validate(custom(function = "not_blank", message = "Model must not be blank"))]
    pub model: Option<String>,
    #[validate(custom(function = "not_blank", message = "Description must not be blank"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be greater than or equal to 0"))]
    pub price: Option<f64>,
    pub image: Option<String>,
    #[validate(range(min = 0, message = "Stock must be greater than or equal to 0"))]
    pub stock: Option<i32>,
    pub category: Option<String>,
    pub is_deleted: Option<bool>,
}

/// 商品列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub brand: Option<String>,
    pub category: Option<String>,
}

/// 商品响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: i64,
    pub uuid: Uuid,
    pub brand: String,
    pub model: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub stock: i32,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.unwrap_or_default(),
            uuid: product.uuid,
            brand: product.brand.clone(),
            model: product.model.clone(),
            description: product.description.clone(),
            price: product.price,
            image: product.image.clone(),
            stock: product.stock,
            category: product.category.name.clone(),
            created_at: product.created_at,
            updated_at: product.updated_at,
            is_deleted: product.is_deleted,
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}
