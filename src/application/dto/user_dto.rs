// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::dto::validation::not_blank;
use crate::domain::models::user::User;

/// 管理员创建或更新用户的请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UserRequest {
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Surname must not be blank"))]
    pub surname: String,
    #[validate(custom(function = "not_blank", message = "Username must not be blank"))]
    pub username: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    /// 更新时可省略，保留原密码
    #[validate(length(min = 5, message = "Password must have at least 5 characters"))]
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
    pub is_deleted: Option<bool>,
}

/// 用户列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_deleted: Option<bool>,
}

/// 用户响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_deleted: bool,
}

/// 用户详情响应，附带订单ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub id: i64,
    pub name: String,
    pub surname: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub is_deleted: bool,
    pub orders: Vec<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            roles: user.roles.iter().map(ToString::to_string).collect(),
            created_at: user.created_at,
            updated_at: user.updated_at,
            is_deleted: user.is_deleted,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl UserInfoResponse {
    pub fn new(user: &User, orders: Vec<String>) -> Self {
        Self {
            id: user.id.unwrap_or_default(),
            name: user.name.clone(),
            surname: user.surname.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            roles: user.roles.iter().map(ToString::to_string).collect(),
            is_deleted: user.is_deleted,
            orders,
        }
    }
}
