// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：分类、商品、订单、用户等核心实体
/// - 仓库接口（repositories）：关系型与文档型数据持久化的抽象接口
/// - 服务（services）：商店业务规则，如库存预留、唯一性校验、认证
///
/// 领域层不依赖于任何具体的存储或传输实现。
pub mod models;
pub mod repositories;
pub mod services;
