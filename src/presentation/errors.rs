// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domain::repositories::storage_repository::StorageError;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::auth_service::AuthError;
use crate::domain::services::categories_service::CategoryError;
use crate::domain::services::orders_service::OrderError;
use crate::domain::services::products_service::ProductError;
use crate::domain::services::users_service::UserError;

/// 访问控制错误
#[derive(Error, Debug)]
pub enum AccessError {
    /// 缺少或无效的认证信息
    #[error("{0}")]
    Unauthorized(String),
    /// 权限不足
    #[error("Access denied")]
    Forbidden,
    /// 请求格式错误
    #[error("{0}")]
    BadRequest(String),
}

/// 应用错误类型
///
/// 封装所有可能的应用层错误，按具体错误类型映射为HTTP状态码
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 错误对应的HTTP状态码
    pub fn status(&self) -> StatusCode {
        if let Some(e) = self.0.downcast_ref::<CategoryError>() {
            return category_status(e);
        }
        if let Some(e) = self.0.downcast_ref::<ProductError>() {
            return match e {
                ProductError::NotFound(_) => StatusCode::NOT_FOUND,
                ProductError::BadUuid(_) => StatusCode::BAD_REQUEST,
                ProductError::Category(e) => category_status(e),
                ProductError::Storage(e) => storage_status(e),
                ProductError::Repository(e) => repository_status(e),
            };
        }
        if let Some(e) = self.0.downcast_ref::<OrderError>() {
            return match e {
                OrderError::NotFound(_) | OrderError::ProductNotFound(_) => StatusCode::NOT_FOUND,
                OrderError::NotItems
                | OrderError::ProductNotStock(_)
                | OrderError::ProductBadPrice(_) => StatusCode::BAD_REQUEST,
                OrderError::Repository(e) => repository_status(e),
            };
        }
        if let Some(e) = self.0.downcast_ref::<UserError>() {
            return match e {
                UserError::NotFound(_) => StatusCode::NOT_FOUND,
                UserError::Conflict(_) => StatusCode::CONFLICT,
                UserError::MissingPassword => StatusCode::BAD_REQUEST,
                UserError::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
                UserError::Repository(e) => repository_status(e),
            };
        }
        if let Some(e) = self.0.downcast_ref::<AuthError>() {
            return match e {
                AuthError::InvalidSignUp(_) | AuthError::UserExists => StatusCode::BAD_REQUEST,
                AuthError::InvalidCredentials | AuthError::InvalidToken(_) => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
                AuthError::Repository(e) => repository_status(e),
            };
        }
        if let Some(e) = self.0.downcast_ref::<AccessError>() {
            return match e {
                AccessError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                AccessError::Forbidden => StatusCode::FORBIDDEN,
                AccessError::BadRequest(_) => StatusCode::BAD_REQUEST,
            };
        }
        if let Some(e) = self.0.downcast_ref::<StorageError>() {
            return storage_status(e);
        }
        if let Some(e) = self.0.downcast_ref::<RepositoryError>() {
            return repository_status(e);
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn category_status(error: &CategoryError) -> StatusCode {
    match error {
        CategoryError::NotFound(_) => StatusCode::NOT_FOUND,
        CategoryError::Conflict(_) => StatusCode::CONFLICT,
        CategoryError::Repository(e) => repository_status(e),
    }
}

fn storage_status(error: &StorageError) -> StatusCode {
    match error {
        StorageError::NotFound(_) => StatusCode::NOT_FOUND,
        StorageError::BadRequest(_) => StatusCode::BAD_REQUEST,
        StorageError::Io(_) | StorageError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn repository_status(error: &RepositoryError) -> StatusCode {
    match error {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = self.0.to_string();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
