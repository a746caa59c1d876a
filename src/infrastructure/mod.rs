// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，提供对具体技术的抽象和封装。
/// 基础设施层负责与外部系统的交互，包括数据库、缓存、文档存储和文件存储。
///
/// 包含的子模块：
/// - 缓存（cache）：内存、Redis 与分层缓存策略
/// - 数据库（database）：数据库连接、实体映射和演示数据
/// - 指标（metrics）：Prometheus 指标导出
/// - 仓库实现（repositories）：领域仓库接口的关系型与文档型实现
/// - 存储（storage）：本地文件与 S3 对象存储
pub mod cache;
pub mod database;
pub mod metrics;
pub mod repositories;
pub mod storage;
