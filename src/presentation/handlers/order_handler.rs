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
use uuid::Uuid;

use crate::application::dto::order_dto::OrderRequest;
use crate::application::dto::page_response::{PageParams, PageResponse};
use crate::domain::services::orders_service::OrdersService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::{ResponseFormat, ValidatedJson};

/// 分页查询所有订单
pub async fn list(
    Extension(service): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let page_request = params.to_page_request();
    let page = service.find_all(&page_request).await?;
    let response = PageResponse::of(page, &page_request, |order| order);
    Ok(format.respond(StatusCode::OK, "orders", &response))
}

/// 根据ID获取订单
pub async fn get_by_id(
    Extension(service): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let order = service.find_by_id(id).await?;
    Ok(format.respond(StatusCode::OK, "order", &order))
}

/// 分页查询某个用户的订单
pub async fn list_by_user(
    Extension(service): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    Path(user_id): Path<i64>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let page_request = params.to_page_request();
    let page = service.find_by_user_id(user_id, &page_request).await?;
    let response = PageResponse::of(page, &page_request, |order| order);
    Ok(format.respond(StatusCode::OK, "orders", &response))
}

/// 创建订单
pub async fn create(
    Extension(service): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    ValidatedJson(request): ValidatedJson<OrderRequest>,
) -> Result<Response, AppError> {
    let order = service.save(request).await?;
    Ok(format.respond(StatusCode::CREATED, "order", &order))
}

/// 更新订单
pub async fn update(
    Extension(service): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<OrderRequest>,
) -> Result<Response, AppError> {
    let order = service.update(id, request).await?;
    Ok(format.respond(StatusCode::OK, "order", &order))
}

/// 删除订单
pub async fn delete(
    Extension(service): Extension<Arc<OrdersService>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
