// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 请求提取器模块
///
/// 提供从HTTP请求中提取数据的工具
/// 包括内容协商、带校验的JSON请求体和当前登录用户
pub mod current_user;
pub mod response_format;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use response_format::ResponseFormat;
pub use validated_json::ValidatedJson;
