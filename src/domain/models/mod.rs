// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 分类（category）：商品分类，名称唯一
/// - 商品（product）：带库存和价格的商品
/// - 订单（order）：以文档形式存储的订单及其订单行
/// - 用户（user）：带角色的系统用户
/// - 通知（notification）：推送给实时通道的变更事件
/// - 分页（page）：分页请求与分页结果
pub mod category;
pub mod notification;
pub mod order;
pub mod page;
pub mod product;
pub mod user;
