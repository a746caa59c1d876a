// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// 解析排序方向，无法识别时使用升序
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("desc") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// 分页请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 页码，从0开始
    pub page: u64,
    /// 每页大小
    pub size: u64,
    /// 排序字段
    pub sort_by: String,
    /// 排序方向
    pub direction: SortDirection,
}

impl PageRequest {
    /// 默认每页大小
    pub const DEFAULT_SIZE: u64 = 10;
    /// 允许的最大每页大小
    pub const MAX_SIZE: u64 = 100;

    /// 允许的最大页码，保证偏移量不超出 SQL 的 64 位有符号整数
    pub const MAX_PAGE: u64 = i64::MAX as u64 / Self::MAX_SIZE;

    /// 创建分页请求，每页大小被限制在 1..=MAX_SIZE，页码不超过 MAX_PAGE
    pub fn new(page: u64, size: u64, sort_by: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            page: page.min(Self::MAX_PAGE),
            size: size.clamp(1, Self::MAX_SIZE),
            sort_by: sort_by.into(),
            direction,
        }
    }

    /// 当前页第一条记录的偏移量
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, Self::DEFAULT_SIZE, "id", SortDirection::Asc)
    }
}

/// 分页结果
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// 当前页内容
    pub content: Vec<T>,
    /// 总记录数
    pub total_elements: u64,
    /// 页码
    pub page: u64,
    /// 每页大小
    pub size: u64,
}

impl<T> Page<T> {
    /// 总页数
    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            0
        } else {
            self.total_elements.div_ceil(self.size)
        }
    }

    /// 转换页内元素类型
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            page: self.page,
            size: self.size,
        }
    }

    /// 从已排序的完整集合中截取一页
    pub fn from_sorted(items: Vec<T>, request: &PageRequest) -> Self {
        let total_elements = items.len() as u64;
        let content = items
            .into_iter()
            .skip(request.offset() as usize)
            .take(request.size as usize)
            .collect();
        Self {
            content,
            total_elements,
            page: request.page,
            size: request.size,
        }
    }
}
