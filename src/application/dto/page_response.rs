// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::page::{Page, PageRequest, SortDirection};

/// 分页查询参数
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
    pub sort_by: Option<String>,
    pub direction: Option<String>,
}

impl PageParams {
    /// 转换为分页请求，缺省值为第0页、每页10条、按 `id` 升序
    pub fn to_page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(PageRequest::DEFAULT_SIZE),
            self.sort_by
                .clone()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| "id".to_string()),
            self.direction
                .as_deref()
                .map(SortDirection::parse)
                .unwrap_or_default(),
        )
    }
}

/// 分页响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page_size: u64,
    pub page_number: u64,
    pub total_page_elements: u64,
    pub empty: bool,
    pub first: bool,
    pub last: bool,
    pub sort_by: String,
    pub direction: String,
}

impl<T> PageResponse<T> {
    /// 由分页结果构造响应，页内元素先转换为响应类型
    pub fn of<U, F: FnMut(U) -> T>(page: Page<U>, request: &PageRequest, f: F) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(f);
        let count = page.content.len() as u64;

        Self {
            total_pages,
            total_elements: page.total_elements,
            page_size: page.size,
            page_number: page.page,
            total_page_elements: count,
            empty: count == 0,
            first: page.page == 0,
            last: page.page.saturating_add(1) >= total_pages,
            sort_by: request.sort_by.clone(),
            direction: request.direction.to_string(),
            content: page.content,
        }
    }
}
