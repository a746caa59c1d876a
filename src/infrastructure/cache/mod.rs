// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 缓存模块
///
/// 提供命名缓存的实现，支持内存、Redis和分层三种后端
pub mod cache_manager;
pub mod cache_strategy;
pub mod redis_client;
