// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use metrics::counter;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::settings::CacheSettings;
use crate::infrastructure::cache::cache_strategy::{
    CacheStats, CacheStrategy, CacheStrategyFactory,
};
use crate::infrastructure::cache::redis_client::RedisClient;

/// 分类缓存名
pub const CATEGORIES_CACHE: &str = "categories";
/// 商品缓存名
pub const PRODUCTS_CACHE: &str = "products";
/// 用户缓存名
pub const USERS_CACHE: &str = "users";

/// 缓存管理器
///
/// 在命名缓存下按键读写可序列化的值。
/// 后端故障只记录告警并按未命中处理，从不向调用方返回错误。
pub struct CacheManager {
    strategy: Box<dyn CacheStrategy>,
}

impl CacheManager {
    /// 根据配置创建缓存管理器
    pub fn new(settings: &CacheSettings, redis_client: Option<Arc<RedisClient>>) -> Result<Self> {
        let strategy = CacheStrategyFactory::create_strategy(settings, redis_client)?;
        Ok(Self { strategy })
    }

    /// 使用指定策略创建缓存管理器
    pub fn with_strategy(strategy: Box<dyn CacheStrategy>) -> Self {
        Self { strategy }
    }

    /// 生成缓存键
    pub fn cache_key(cache: &str, key: impl Display) -> String {
        format!("{}::{}", cache, key)
    }

    /// 获取缓存值
    pub async fn get<T: DeserializeOwned>(&self, cache: &str, key: impl Display) -> Option<T> {
        let cache_key = Self::cache_key(cache, key);

        match self.strategy.get(&cache_key).await {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(value) => {
                    counter!("cache_hits_total", "cache" => cache.to_string()).increment(1);
                    debug!("Cache hit for {}", cache_key);
                    Some(value)
                }
                Err(e) => {
                    warn!("Discarding undecodable cache entry {}: {}", cache_key, e);
                    self.evict_key(&cache_key).await;
                    None
                }
            },
            Ok(None) => {
                counter!("cache_misses_total", "cache" => cache.to_string()).increment(1);
                None
            }
            Err(e) => {
                counter!("cache_errors_total", "cache" => cache.to_string()).increment(1);
                warn!("Cache read failed for {}: {}", cache_key, e);
                None
            }
        }
    }

    /// 设置缓存值
    pub async fn put<T: Serialize>(&self, cache: &str, key: impl Display, value: &T) {
        let cache_key = Self::cache_key(cache, key);

        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", cache_key, e);
                return;
            }
        };

        if let Err(e) = self.strategy.set(&cache_key, json, None).await {
            counter!("cache_errors_total", "cache" => cache.to_string()).increment(1);
            warn!("Cache write failed for {}: {}", cache_key, e);
        }
    }

    /// 删除缓存值
    pub async fn evict(&self, cache: &str, key: impl Display) {
        let cache_key = Self::cache_key(cache, key);
        self.evict_key(&cache_key).await;
    }

    async fn evict_key(&self, cache_key: &str) {
        if let Err(e) = self.strategy.delete(cache_key).await {
            warn!("Cache eviction failed for {}: {}", cache_key, e);
        }
    }

    /// 清空指定命名缓存下的全部条目
    pub async fn evict_all(&self, cache: &str) {
        let prefix = Self::cache_key(cache, "");
        match self.strategy.delete_prefix(&prefix).await {
            Ok(removed) => debug!("Evicted {} entries from cache {}", removed, cache),
            Err(e) => warn!("Cache eviction failed for {}: {}", prefix, e),
        }
    }

    /// 清空缓存
    pub async fn clear(&self) {
        if let Err(e) = self.strategy.clear().await {
            warn!("Cache clear failed: {}", e);
        }
    }

    /// 获取缓存统计信息
    pub fn get_stats(&self) -> CacheStats {
        self.strategy.get_stats()
    }

    /// 获取缓存命中率
    pub fn get_hit_rate(&self) -> f64 {
        let stats = self.get_stats();
        let total_requests = stats.hits + stats.misses;

        if total_requests == 0 {
            0.0
        } else {
            stats.hits as f64 / total_requests as f64
        }
    }
}
