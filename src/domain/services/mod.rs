// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含商店的核心业务规则，协调仓库、缓存和通知通道来完成业务操作。
///
/// 包含的服务：
/// - 分类服务（categories_service）：分类名称唯一性与删除约束
/// - 商品服务（products_service）：商品查询、图片上传与变更通知
/// - 订单服务（orders_service）：订单校验、库存预留与归还
/// - 用户服务（users_service）：用户管理、密码哈希与软删除
/// - 认证服务（auth_service）：注册、登录与JWT令牌
/// - 存储服务（storage_service）：商品图片文件的存取
/// - 通知（notifier）：商品变更的推送接口
pub mod auth_service;
pub mod categories_service;
pub mod notifier;
pub mod orders_service;
pub mod products_service;
pub mod storage_service;
pub mod users_service;
