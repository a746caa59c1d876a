// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::dto::validation::not_blank;
use crate::domain::models::order::{Address, Customer, OrderLine};

/// 地址请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct AddressRequest {
    #[validate(custom(function = "not_blank", message = "Street must not be blank"))]
    pub street: String,
    #[validate(custom(function = "not_blank", message = "Number must not be blank"))]
    pub number: String,
    #[validate(custom(function = "not_blank", message = "City must not be blank"))]
    pub city: String,
    #[validate(custom(function = "not_blank", message = "Province must not be blank"))]
    pub province: String,
    #[validate(custom(function = "not_blank", message = "Country must not be blank"))]
    pub country: String,
    #[validate(custom(function = "not_blank", message = "Postal code must not be blank"))]
    pub postal_code: String,
}

/// 客户请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CustomerRequest {
    #[validate(length(min = 3, message = "Full name must have at least 3 characters"))]
    pub full_name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[validate(custom(function = "not_blank", message = "Phone must not be blank"))]
    pub phone: String,
    #[validate(nested)]
    pub address: AddressRequest,
}

/// 订单行请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct OrderLineRequest {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
    #[validate(range(min = 0, message = "Product id must be greater than or equal to 0"))]
    pub product_id: i64,
    #[validate(range(min = 0.0, message = "Product price must be greater than or equal to 0"))]
    pub product_price: f64,
}

/// 创建或更新订单的请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct OrderRequest {
    #[validate(range(min = 0, message = "User id must be greater than or equal to 0"))]
    #[serde(default)]
    pub user_id: i64,
    #[validate(nested)]
    pub customer: CustomerRequest,
    #[validate(length(min = 1, message = "An order needs at least one line"), nested)]
    pub lines: Vec<OrderLineRequest>,
}

impl From<AddressRequest> for Address {
    fn from(request: AddressRequest) -> Self {
        Self {
            street: request.street,
            number: request.number,
            city: request.city,
            province: request.province,
            country: request.country,
            postal_code: request.postal_code,
        }
    }
}

impl From<CustomerRequest> for Customer {
    fn from(request: CustomerRequest) -> Self {
        Self {
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            address: request.address.into(),
        }
    }
}

impl From<OrderLineRequest> for OrderLine {
    fn from(request: OrderLineRequest) -> Self {
        Self {
            quantity: request.quantity,
            product_id: request.product_id,
            product_price: request.product_price,
            total: 0.0,
        }
    }
}
