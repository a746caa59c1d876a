// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 定义请求与响应的数据传输对象，以及它们与领域模型之间的映射
pub mod dto;
