// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{http::StatusCode, response::Response, Extension};
use std::sync::Arc;

use crate::application::dto::auth_dto::{SignInRequest, SignUpRequest};
use crate::domain::services::auth_service::AuthService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::{ResponseFormat, ValidatedJson};

/// 注册
pub async fn sign_up(
    Extension(auth): Extension<Arc<AuthService>>,
    format: ResponseFormat,
    ValidatedJson(request): ValidatedJson<SignUpRequest>,
) -> Result<Response, AppError> {
    let response = auth.sign_up(request).await?;
    Ok(format.respond(StatusCode::OK, "auth", &response))
}

/// 登录
pub async fn sign_in(
    Extension(auth): Extension<Arc<AuthService>>,
    format: ResponseFormat,
    ValidatedJson(request): ValidatedJson<SignInRequest>,
) -> Result<Response, AppError> {
    let response = auth.sign_in(request).await?;
    Ok(format.respond(StatusCode::OK, "auth", &response))
}
