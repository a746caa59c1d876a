// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::domain::models::user::User;
use crate::presentation::errors::{AccessError, AppError};

/// 认证中间件放入请求扩展中的当前用户
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// 当前用户ID
    pub fn id(&self) -> i64 {
        self.0.id.unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| AccessError::Unauthorized("Authentication required".to_string()).into())
    }
}
