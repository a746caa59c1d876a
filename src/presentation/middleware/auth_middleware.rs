// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::user::User;
use crate::domain::services::auth_service::AuthService;
use crate::presentation::errors::{AccessError, AppError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// 从 Authorization 头中取出 Bearer 令牌
pub fn bearer_token(value: Option<&str>) -> Option<&str> {
    value
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 认证中间件
///
/// 校验 Bearer JWT 并把当前用户放入请求扩展
///
/// # 参数
///
/// * `auth` - 认证服务
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(AppError)` - 缺少或无效的令牌（401）
pub async fn auth_middleware(
    State(auth): State<Arc<AuthService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    let token = bearer_token(
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    )
    .ok_or_else(|| AccessError::Unauthorized("Missing bearer token".to_string()))?
    .to_string();

    match auth.authenticate(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            warn!("Rejected token for {}: {}", req.uri().path(), e);
            Err(e.into())
        }
    }
}

/// 管理员校验中间件，必须放在认证中间件之后
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    match req.extensions().get::<User>() {
        Some(user) if user.is_admin() => Ok(next.run(req).await),
        Some(user) => {
            warn!("User {} is not an admin", user.username);
            Err(AccessError::Forbidden.into())
        }
        None => Err(AccessError::Unauthorized("Authentication required".to_string()).into()),
    }
}
