// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::settings::{CacheBackend, CacheSettings};
use crate::infrastructure::cache::redis_client::RedisClient;

/// 缓存统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub stores: u64,
}

/// 线程安全的统计计数器
#[derive(Debug, Default)]
struct StatsCounter {
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
    stores: AtomicU64,
}

impl StatsCounter {
    fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}

/// 缓存条目
#[derive(Clone)]
struct CacheEntry<T> {
    data: T,
    created_at: Instant,
    ttl: Duration,
    access_count: u64,
}

impl<T> CacheEntry<T> {
    fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            created_at: Instant::now(),
            ttl,
            access_count: 0,
        }
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() > self.ttl
    }

    fn touch(&mut self) {
        self.access_count += 1;
    }

    fn get_priority_score(&self) -> f64 {
        let age_score = self.created_at.elapsed().as_secs_f64() * 0.1;
        let access_score = self.access_count as f64 * 0.9;
        age_score + access_score
    }
}

/// 缓存策略接口
///
/// 值以序列化后的 JSON 字符串保存，类型转换由 `CacheManager` 负责
#[async_trait]
pub trait CacheStrategy: Send + Sync {
    /// 获取缓存值
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// 设置缓存值
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()>;

    /// 删除缓存值
    async fn delete(&self, key: &str) -> Result<()>;

    /// 删除所有以 `prefix` 开头的缓存值，返回删除数量
    async fn delete_prefix(&self, prefix: &str) -> Result<usize>;

    /// 清空缓存
    async fn clear(&self) -> Result<()>;

    /// 获取缓存统计信息
    fn get_stats(&self) -> CacheStats;
}

/// 内存缓存策略
pub struct MemoryCacheStrategy {
    cache: DashMap<String, CacheEntry<String>>,
    ttl: Duration,
    max_entries: usize,
    stats: StatsCounter,
}

impl MemoryCacheStrategy {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            cache: DashMap::new(),
            ttl,
            max_entries: max_entries.max(1),
            stats: StatsCounter::default(),
        }
    }

    fn evict_if_needed(&self) {
        let current_size = self.cache.len();
        if current_size <= self.max_entries {
            return;
        }

        // Evict an extra 10% so inserts do not trigger a scan every time
        let to_evict = current_size - self.max_entries + (self.max_entries / 10);

        let mut entries: Vec<(String, f64)> = self
            .cache
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().get_priority_score()))
            .collect();

        entries.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

        for (key, _) in entries.iter().take(to_evict) {
            self.cache.remove(key);
        }

        self.stats
            .evictions
            .fetch_add(to_evict as u64, Ordering::Relaxed);
        debug!("Evicted {} entries from memory cache", to_evict);
    }

    /// 当前条目数
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// 缓存是否为空
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[async_trait]
impl CacheStrategy for MemoryCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(mut entry) = self.cache.get_mut(key) {
            if entry.is_expired() {
                drop(entry);
                self.cache.remove(key);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return Ok(None);
            }

            entry.touch();
            self.stats.hits.fetch_add(1, Ordering::Relaxed);
            Ok(Some(entry.data.clone()))
        } else {
            self.stats.misses.fetch_add(1, Ordering::Relaxed);
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let ttl = ttl.unwrap_or(self.ttl);
        self.cache.insert(key.to_string(), CacheEntry::new(value, ttl));
        self.evict_if_needed();
        self.stats.stores.fetch_add(1, Ordering::Relaxed);

        debug!("Stored memory cache entry for key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.cache.remove(key);
        debug!("Deleted cache entry for key: {}", key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let before = self.cache.len();
        self.cache.retain(|key, _| !key.starts_with(prefix));
        let removed = before.saturating_sub(self.cache.len());
        debug!("Deleted {} memory cache entries with prefix {}", removed, prefix);
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        self.cache.clear();
        info!("Cleared all memory cache entries");
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

/// Redis缓存策略
pub struct RedisCacheStrategy {
    redis_client: Arc<RedisClient>,
    ttl: Duration,
    stats: StatsCounter,
}

impl RedisCacheStrategy {
    pub fn new(redis_client: Arc<RedisClient>, ttl: Duration) -> Self {
        Self {
            redis_client,
            ttl,
            stats: StatsCounter::default(),
        }
    }

    fn generate_cache_key(&self, key: &str) -> String {
        format!("storefront_cache:{}", key)
    }
}

#[async_trait]
impl CacheStrategy for RedisCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cache_key = self.generate_cache_key(key);

        match self.redis_client.get(&cache_key).await? {
            Some(json_str) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!("Cache hit for key: {}", key);
                Ok(Some(json_str))
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!("Cache miss for key: {}", key);
                Ok(None)
            }
        }
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let cache_key = self.generate_cache_key(key);
        let ttl = ttl.unwrap_or(self.ttl);

        self.redis_client
            .set(&cache_key, &value, ttl.as_secs().max(1) as usize)
            .await?;
        self.stats.stores.fetch_add(1, Ordering::Relaxed);

        debug!("Stored Redis cache entry for key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let cache_key = self.generate_cache_key(key);
        self.redis_client.del(&cache_key).await?;

        debug!("Deleted cache entry for key: {}", key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let pattern = format!("{}*", self.generate_cache_key(prefix));
        let removed = self.redis_client.del_by_pattern(&pattern).await?;
        debug!("Deleted {} Redis cache entries with prefix {}", removed, prefix);
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        let removed = self
            .redis_client
            .del_by_pattern(&self.generate_cache_key("*"))
            .await?;
        info!("Cleared {} Redis cache entries", removed);
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

/// 分层缓存策略（内存+Redis）
pub struct LayeredCacheStrategy {
    memory_cache: MemoryCacheStrategy,
    redis_cache: RedisCacheStrategy,
    memory_ttl: Duration,
}

impl LayeredCacheStrategy {
    pub fn new(
        memory_cache: MemoryCacheStrategy,
        redis_cache: RedisCacheStrategy,
        memory_ttl: Duration,
    ) -> Self {
        Self {
            memory_cache,
            redis_cache,
            memory_ttl,
        }
    }
}

#[async_trait]
impl CacheStrategy for LayeredCacheStrategy {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if let Some(value) = self.memory_cache.get(key).await? {
            debug!("Layered cache hit in memory layer for key: {}", key);
            return Ok(Some(value));
        }

        if let Some(value) = self.redis_cache.get(key).await? {
            debug!("Layered cache hit in Redis layer for key: {}", key);

            // Backfill the memory layer
            self.memory_cache
                .set(key, value.clone(), Some(self.memory_ttl))
                .await?;

            return Ok(Some(value));
        }

        debug!("Layered cache miss for key: {}", key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let memory_future = self
            .memory_cache
            .set(key, value.clone(), Some(self.memory_ttl));
        let redis_future = self.redis_cache.set(key, value, ttl);

        tokio::try_join!(memory_future, redis_future)?;

        debug!("Set layered cache for key: {}", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let memory_future = self.memory_cache.delete(key);
        let redis_future = self.redis_cache.delete(key);

        tokio::try_join!(memory_future, redis_future)?;

        debug!("Deleted layered cache for key: {}", key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<usize> {
        let memory_future = self.memory_cache.delete_prefix(prefix);
        let redis_future = self.redis_cache.delete_prefix(prefix);

        let (_, removed) = tokio::try_join!(memory_future, redis_future)?;
        Ok(removed)
    }

    async fn clear(&self) -> Result<()> {
        let memory_future = self.memory_cache.clear();
        let redis_future = self.redis_cache.clear();

        tokio::try_join!(memory_future, redis_future)?;

        info!("Cleared layered cache");
        Ok(())
    }

    fn get_stats(&self) -> CacheStats {
        let memory_stats = self.memory_cache.get_stats();
        let redis_stats = self.redis_cache.get_stats();

        CacheStats {
            hits: memory_stats.hits + redis_stats.hits,
            misses: redis_stats.misses,
            evictions: memory_stats.evictions + redis_stats.evictions,
            stores: memory_stats.stores + redis_stats.stores,
        }
    }
}

/// 缓存策略工厂
pub struct CacheStrategyFactory;

impl CacheStrategyFactory {
    /// 根据配置创建缓存策略
    ///
    /// Redis 与分层策略需要 Redis 客户端，缺失时返回错误
    pub fn create_strategy(
        settings: &CacheSettings,
        redis_client: Option<Arc<RedisClient>>,
    ) -> Result<Box<dyn CacheStrategy>> {
        let ttl = Duration::from_secs(settings.ttl_seconds);

        match settings.backend {
            CacheBackend::Memory => Ok(Box::new(MemoryCacheStrategy::new(
                ttl,
                settings.max_entries,
            ))),
            CacheBackend::Redis => {
                let redis_client = redis_client.ok_or_else(|| {
                    anyhow::anyhow!("Redis client required for Redis cache backend")
                })?;
                Ok(Box::new(RedisCacheStrategy::new(redis_client, ttl)))
            }
            CacheBackend::Layered => {
                let redis_client = redis_client.ok_or_else(|| {
                    anyhow::anyhow!("Redis client required for Layered cache backend")
                })?;
                // Memory layer keeps entries for a tenth of the Redis TTL
                let memory_ttl = Duration::from_secs((settings.ttl_seconds / 10).max(1));

                Ok(Box::new(LayeredCacheStrategy::new(
                    MemoryCacheStrategy::new(memory_ttl, settings.max_entries),
                    RedisCacheStrategy::new(redis_client, ttl),
                    memory_ttl,
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_cache_hit_and_miss() {
        let cache = MemoryCacheStrategy::new(Duration::from_secs(60), 10);

        assert_eq!(cache.get("missing").await.unwrap(), None);
        cache.set("key", "value".to_string(), None).await.unwrap();
        assert_eq!(cache.get("key").await.unwrap(), Some("value".to_string()));

        let stats = cache.get_stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.stores, 1);
    }

    #[tokio::test]
    async fn test_memory_cache_expires_entries() {
        let cache = MemoryCacheStrategy::new(Duration::from_secs(60), 10);

        cache
            .set("short", "v".to_string(), Some(Duration::from_millis(1)))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(cache.get("short").await.unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_memory_cache_evicts_over_capacity() {
        let cache = MemoryCacheStrategy::new(Duration::from_secs(60), 10);

        for i in 0..11 {
            cache
                .set(&format!("key-{}", i), i.to_string(), None)
                .await
                .unwrap();
        }

        assert!(cache.len() <= 10);
        assert!(cache.get_stats().evictions >= 1);
    }

    #[tokio::test]
    async fn test_delete_and_clear() {
        let cache = MemoryCacheStrategy::new(Duration::from_secs(60), 10);
        cache.set("a", "1".to_string(), None).await.unwrap();
        cache.set("b", "2".to_string(), None).await.unwrap();

        cache.delete("a").await.unwrap();
        assert_eq!(cache.get("a").await.unwrap(), None);

        cache.clear().await.unwrap();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn test_memory_cache_delete_prefix() {
        let cache = MemoryCacheStrategy::new(Duration::from_secs(60), 10);
        cache.set("products::1", "1".to_string(), None).await.unwrap();
        cache.set("products::2", "2".to_string(), None).await.unwrap();
        cache.set("categories::1", "3".to_string(), None).await.unwrap();

        assert_eq!(cache.delete_prefix("products::").await.unwrap(), 2);
        assert_eq!(cache.get("products::1").await.unwrap(), None);
        assert_eq!(
            cache.get("categories::1").await.unwrap(),
            Some("3".to_string())
        );
    }

    #[test]
    fn test_factory_requires_redis_for_redis_backend() {
        let settings = CacheSettings {
            backend: CacheBackend::Redis,
            ttl_seconds: 60,
            max_entries: 10,
        };
        assert!(CacheStrategyFactory::create_strategy(&settings, None).is_err());
    }
}
