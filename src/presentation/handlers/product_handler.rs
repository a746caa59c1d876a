// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Multipart, Path, Query},
    http::StatusCode,
    response::Response,
    Extension,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::application::dto::product_dto::{
    ProductCreateRequest, ProductQuery, ProductResponse, ProductUpdateRequest,
};
use crate::domain::repositories::storage_repository::StorageError;
use crate::domain::services::products_service::ProductsService;
use crate::presentation::errors::AppError;
use crate::presentation::extractors::{ResponseFormat, ValidatedJson};

/// 图片上传参数
#[derive(Debug, Default, Deserialize)]
pub struct ImageParams {
    /// 是否保存完整访问地址
    pub with_url: Option<bool>,
}

/// 按品牌和分类查询商品
pub async fn list(
    Extension(service): Extension<Arc<ProductsService>>,
    format: ResponseFormat,
    Query(query): Query<ProductQuery>,
) -> Result<Response, AppError> {
    let products: Vec<ProductResponse> = service
        .find_all(query.brand.as_deref(), query.category.as_deref())
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    Ok(format.respond_list(StatusCode::OK, "products", &products))
}

/// 根据ID获取商品
pub async fn get_by_id(
    Extension(service): Extension<Arc<ProductsService>>,
    format: ResponseFormat,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let product = service.find_by_id(id).await?;
    Ok(format.respond(StatusCode::OK, "product", &ProductResponse::from(product)))
}

/// 根据UUID获取商品
pub async fn get_by_uuid(
    Extension(service): Extension<Arc<ProductsService>>,
    format: ResponseFormat,
    Path(uuid): Path<String>,
) -> Result<Response, AppError> {
    let product = service.find_by_uuid(&uuid).await?;
    Ok(format.respond(StatusCode::OK, "product", &ProductResponse::from(product)))
}

/// 创建商品
pub async fn create(
    Extension(service): Extension<Arc<ProductsService>>,
    format: ResponseFormat,
    ValidatedJson(request): ValidatedJson<ProductCreateRequest>,
) -> Result<Response, AppError> {
    let product = service.save(request).await?;
    Ok(format.respond(
        StatusCode::CREATED,
        "product",
        &ProductResponse::from(product),
    ))
}

/// 更新商品（PUT 与 PATCH 共用，未提供的字段保持不变）
pub async fn update(
    Extension(service): Extension<Arc<ProductsService>>,
    format: ResponseFormat,
    Path(id): Path<i64>,
    ValidatedJson(request): ValidatedJson<ProductUpdateRequest>,
) -> Result<Response, AppError> {
    let product = service.update(id, request).await?;
    Ok(format.respond(StatusCode::OK, "product", &ProductResponse::from(product)))
}

/// 删除商品
pub async fn delete(
    Extension(service): Extension<Arc<ProductsService>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    service.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 上传商品图片，表单字段名为 `file`
pub async fn update_image(
    Extension(service): Extension<Arc<ProductsService>>,
    format: ResponseFormat,
    Path(id): Path<i64>,
    Query(params): Query<ImageParams>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| StorageError::BadRequest(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("image").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| StorageError::BadRequest(e.body_text()))?;
        debug!("Received image {} ({} bytes) for product {}", file_name, data.len(), id);

        let product = service
            .update_image(id, &file_name, &data, params.with_url.unwrap_or(false))
            .await?;
        return Ok(format.respond(StatusCode::OK, "product", &ProductResponse::from(product)));
    }

    Err(StorageError::BadRequest("No file was provided in field 'file'".to_string()).into())
}
