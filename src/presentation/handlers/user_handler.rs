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
use crate::application::dto::user_dto::{UserInfoResponse, UserQuery, UserRequest, UserResponse};
use crate::domain::services::orders_service::OrdersService;
use crate::domain::services::users_service::UsersService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::{CurrentUser, ResponseFormat, ValidatedJson};

/// 分页查询用户
pub async fn list(
    Extension(service): Extension<Arc<UsersService>>,
    format: ResponseFormat,
    Query(query): Query<UserQuery>,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let page_request = params.to_page_request();
    let page = service
        .find_all(query.username, query.email, query.is_deleted, &page_request)
        .await?;
    let response = PageResponse::of(page, &page_request, UserResponse::from);
    Ok(format.respond(StatusCode::OK, "users", &response))
}

/// 根据ID获取用户及其订单ID
pub async fn get_by_id(
    Extension(service): Extension<Arc<UsersService>>,
    format: ResponseFormat,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let (user, orders) = service.find_by_id(id).await?;
    let response = UserInfoResponse::new(&user, order_ids(orders));
    Ok(format.respond(StatusCode::OK, "user", &response))
}

/// 创建用户
pub async fn create(
    Extension(service): Extension<Arc<UsersService>>,
    format: ResponseFormat,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<Response, AppError> {
    let user = service.save(request).await?;
    Ok(format.respond(StatusCode::CREATED, "user", &UserResponse::from(user)))
}

/// 更新用户
pub async fn update(
    Extension(service): Extension<Arc<UsersService>>,
    format: ResponseFormat,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<UserRequest>,
) -> Result<Response, AppError> {
    let user = service.update(id, request).await?;
    Ok(format.respond(StatusCode::OK, "user", &UserResponse::from(user)))
}

/// 删除用户
pub async fn delete(
    Extension(service): Extension<Arc<UsersService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 当前用户资料
pub async fn me_profile(
    Extension(service): Extension<Arc<UsersService>>,
    format: ResponseFormat,
    current: CurrentUser,
) -> Result<Response, AppError> {
    let (user, orders) = service.find_by_id(current.id()).await?;
    let response = UserInfoResponse::new(&user, order_ids(orders));
    Ok(format.respond(StatusCode::OK, "user", &response))
}

/// 更新当前用户资料，角色和删除状态不能自行修改
pub async fn update_me(
    Extension(service): Extension<Arc<UsersService>>,
    format: ResponseFormat,
    current: CurrentUser,
    ValidatedJson(mut request): ValidatedJson<UserRequest>,
) -> Result<Response, AppError> {
    request.roles = None;
    request.is_deleted = None;
    let user = service.update(current.id(), request).await?;
    Ok(format.respond(StatusCode::OK, "user", &UserResponse::from(user)))
}

/// 删除当前用户
pub async fn delete_me(
    Extension(service): Extension<Arc<UsersService>>,
    current: CurrentUser,
) -> Result<StatusCode, AppError> {
    service.delete_by_id(current.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 分页查询当前用户的订单
pub async fn my_orders(
    Extension(orders): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    current: CurrentUser,
    Query(params): Query<PageParams>,
) -> Result<Response, AppError> {
    let page_request = params.to_page_request();
    let page = orders.find_by_user_id(current.id(), &page_request).await?;
    let response = PageResponse::of(page, &page_request, |order| order);
    Ok(format.respond(StatusCode::OK, "orders", &response))
}

/// 获取当前用户的一个订单
pub async fn my_order(
    Extension(orders): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let order = orders.find_owned(id, current.id()).await?;
    Ok(format.respond(StatusCode::OK, "order", &order))
}

/// 为当前用户创建订单
pub async fn create_my_order(
    Extension(orders): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    current: CurrentUser,
    ValidatedJson(mut request): ValidatedJson<OrderRequest>,
) -> Result<Response, AppError> {
    request.user_id = current.id();
    let order = orders.save(request).await?;
    Ok(format.respond(StatusCode::CREATED, "order", &order))
}

/// 更新当前用户的订单
pub async fn update_my_order(
    Extension(orders): Extension<Arc<OrdersService>>,
    format: ResponseFormat,
    current: CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<OrderRequest>,
) -> Result<Response, AppError> {
    let order = orders.update_owned(id, current.id(), request).await?;
    Ok(format.respond(StatusCode::OK, "order", &order))
}

/// 删除当前用户的订单
pub async fn delete_my_order(
    Extension(orders): Extension<Arc<OrdersService>>,
    current: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    orders.delete_owned(id, current.id()).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn order_ids(ids: Vec<Uuid>) -> Vec<String> {
    ids.into_iter().map(|id| id.to_string()).collect()
}
