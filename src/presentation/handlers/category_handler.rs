// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Response,
    Extension,
};
use std::sync::Arc;

use crate::application::dto::category_dto::{CategoryQuery, CategoryRequest};
use crate::application::dto::page_response::{PageParams, PageResponse};
use crate::domain::services::categories_service::CategoriesService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::{ResponseFormat, ValidatedJson};

/// 分页查询分类
pub async fn list(
    Extension(service): Extension<Arc<CategoriesService>>,
    format: ResponseFormat,
    Query(query): Query<CategoryQuery>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let page_request = params.to_page_request();
    let page = service
        .find_all(query.name, query.is_deleted, &page_request)
        .await?;
    let response = PageResponse::of(page, &page_request, |category| category);
    Ok(format.respond(StatusCode::OK, "categories", &response))
}

/// 根据ID获取分类
pub async fn get_by_id(
    Extension(service): Extension<Arc<CategoriesService>>,
    format: ResponseFormat,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let category = service.find_by_id(id).await?;
    Ok(format.respond(StatusCode::OK, "category", &category))
}

/// 创建分类
pub async fn create(
    Extension(service): Extension<Arc<CategoriesService>>,
    format: ResponseFormat,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<Response, AppError> {
    let category = service.save(request).await?;
    Ok(format.respond(StatusCode::CREATED, "category", &category))
}

/// 更新分类
pub async fn update(
    Extension(service): Extension<Arc<CategoriesService>>,
    format: ResponseFormat,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<CategoryRequest>,
) -> Result<Response, AppError> {
    let category = service.update(id, request).await?;
    Ok(format.respond(StatusCode::OK, "category", &category))
}

/// 删除分类
pub async fn delete(
    Extension(service): Extension<Arc<CategoriesService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
