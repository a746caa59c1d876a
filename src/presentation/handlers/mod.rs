// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 包含各个API端点的具体处理逻辑
/// 实体响应按 Accept 头输出 JSON 或 XML
pub mod auth_handler;
pub mod category_handler;
pub mod order_handler;
pub mod product_handler;
pub mod storage_handler;
pub mod user_handler;
