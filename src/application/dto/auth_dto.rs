// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::dto::validation::not_blank;

/// 注册请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SignUpRequest {
    #[validate(custom(function = "not_blank", message = "Name must not be blank"))]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "Surname must not be blank"))]
    pub surname: String,
    #[validate(custom(function = "not_blank", message = "Username must not be blank"))]
    pub username: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[validate(length(min = 5, message = "Password must have at least 5 characters"))]
    pub password: String,
    #[validate(length(min = 5, message = "Password confirmation must have at least 5 characters"))]
    pub password_confirmation: String,
}

/// 登录请求
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct SignInRequest {
    #[validate(custom(function = "not_blank", message = "Username must not be blank"))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "Password must not be blank"))]
    pub password: String,
}

/// 认证成功返回的令牌
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtAuthResponse {
    pub token: String,
}
