// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension,
};
use std::sync::Arc;

use crate::domain::services::storage_service::{content_type_for, StorageService};
use crate::presentation::errors::AppError;

/// 读取已存储的文件
pub async fn serve(
    Extension(storage): Extension<Arc<StorageService>>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    let data = storage.load(&filename).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type_for(&filename))],
        data,
    )
        .into_response())
}
