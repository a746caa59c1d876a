// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 分类仓库（category_repository）：关系型存储中的商品分类
/// - 商品仓库（product_repository）：关系型存储中的商品及其库存
/// - 用户仓库（user_repository）：关系型存储中的用户和角色
/// - 订单仓库（order_repository）：文档存储中的订单
/// - 存储仓库（storage_repository）：商品图片等文件的存储
pub mod category_repository;
pub mod error;
pub mod order_repository;
pub mod product_repository;
pub mod storage_repository;
pub mod user_repository;

pub use error::RepositoryError;
