// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库实现模块
///
/// 提供领域仓库接口的具体实现
/// 分类、商品和用户基于关系型数据库，订单基于文档存储
pub mod category_repo_impl;
pub mod order_memory_repo;
pub mod order_redis_repo;
pub mod product_repo_impl;
pub mod user_repo_impl;
