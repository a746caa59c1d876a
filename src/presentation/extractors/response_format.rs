// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::convert::Infallible;
use tracing::error;

/// 响应格式
///
/// 根据 `Accept` 请求头选择 XML 或 JSON，默认 JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseFormat {
    #[default]
    Json,
    Xml,
}

/// XML 列表包装，每个元素输出为 `<item>`
#[derive(Serialize)]
struct XmlList<'a, T> {
    item: &'a [T],
}

impl ResponseFormat {
    /// 从 Accept 头解析响应格式
    pub fn from_accept(accept: Option<&str>) -> Self {
        match accept {
            Some(value)
                if value.contains("application/xml") || value.contains("text/xml") =>
            {
                ResponseFormat::Xml
            }
            _ => ResponseFormat::Json,
        }
    }

    /// 按协商的格式输出单个实体，XML 根元素为 `root`
    pub fn respond<T: Serialize>(self, status: StatusCode, root: &str, value: &T) -> Response {
        match self {
            ResponseFormat::Json => (status, Json(value)).into_response(),
            ResponseFormat::Xml => match quick_xml::se::to_string_with_root(root, value) {
                Ok(body) => xml_response(status, body),
                Err(e) => serialization_failure(e),
            },
        }
    }

    /// 按协商的格式输出列表，JSON 为数组
    pub fn respond_list<T: Serialize>(self, status: StatusCode, root: &str, items: &[T]) -> Response {
        match self {
            ResponseFormat::Json => (status, Json(items)).into_response(),
            ResponseFormat::Xml => {
                match quick_xml::se::to_string_with_root(root, &XmlList { item: items }) {
                    Ok(body) => xml_response(status, body),
                    Err(e) => serialization_failure(e),
                }
            }
        }
    }
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/xml"),
        )],
        body,
    )
        .into_response()
}

fn serialization_failure(e: quick_xml::SeError) -> Response {
    error!("Failed to serialize XML response: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to serialize response" })),
    )
        .into_response()
}

impl<S> FromRequestParts<S> for ResponseFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok());
        Ok(ResponseFormat::from_accept(accept))
    }
}
