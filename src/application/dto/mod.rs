// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义应用程序层的数据传输对象
/// 用于在API请求和领域模型之间传输数据
pub mod auth_dto;
pub mod category_dto;
pub mod order_dto;
pub mod page_response;
pub mod product_dto;
pub mod user_dto;
pub mod validation;
