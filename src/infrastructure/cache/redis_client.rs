// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use anyhow::Result;
use redis::AsyncCommands;

/// Redis客户端
///
/// 提供对Redis数据库的异步操作接口
#[derive(Clone)]
pub struct RedisClient {
    /// Redis客户端
    client: redis::Client,
}

impl RedisClient {
    /// 创建新的Redis客户端实例
    ///
    /// # 参数
    ///
    /// * `redis_url` - Redis连接URL
    ///
    /// # 返回值
    ///
    /// * `Ok(RedisClient)` - Redis客户端实例
    /// * `Err(anyhow::Error)` - 创建过程中出现的错误
    pub async fn new(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        Ok(Self { client })
    }

    /// 获取指定键的值
    ///
    /// # 参数
    ///
    /// * `key` - 键
    ///
    /// # 返回值
    ///
    /// * `Ok(Option<String>)` - 键对应的值，如果不存在则返回None
    /// * `Err(anyhow::Error)` - 获取过程中出现的错误
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = con.get(key).await?;
        Ok(value)
    }

    /// 设置键值对并指定过期时间
    ///
    /// # 参数
    ///
    /// * `key` - 键
    /// * `value` - 值
    /// * `ttl_seconds` - 过期时间（秒）
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 设置成功
    /// * `Err(anyhow::Error)` - 设置过程中出现的错误
    pub async fn set(&self, key: &str, value: &str, ttl_seconds: usize) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.set_ex::<_, _, ()>(key, value, ttl_seconds as u64)
            .await?;
        Ok(())
    }

    /// 永久设置键值对
    ///
    /// # 参数
    ///
    /// * `key` - 键
    /// * `value` - 值
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 设置成功
    /// * `Err(anyhow::Error)` - 设置过程中出现的错误
    pub async fn set_forever(&self, key: &str, value: &str) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.set::<_, _, ()>(key, value).await?;
        Ok(())
    }

    /// 删除指定键
    ///
    /// # 参数
    ///
    /// * `key` - 键
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 删除成功（键不存在时同样成功）
    /// * `Err(anyhow::Error)` - 删除过程中出现的错误
    pub async fn del(&self, key: &str) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.del::<_, ()>(key).await?;
        Ok(())
    }

    /// 删除所有匹配模式的键
    ///
    /// # 返回值
    ///
    /// * `Ok(usize)` - 删除的键数量
    /// * `Err(anyhow::Error)` - 删除过程中出现的错误
    pub async fn del_by_pattern(&self, pattern: &str) -> Result<usize> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let keys: Vec<String> = con.keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        con.del::<_, ()>(&keys).await?;
        Ok(keys.len())
    }

    /// 批量获取多个键的值，结果顺序与键一致
    pub async fn get_many(&self, keys: &[String]) -> Result<Vec<Option<String>>> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let mut values = Vec::with_capacity(keys.len());
        for key in keys {
            let value: Option<String> = con.get(key).await?;
            values.push(value);
        }
        Ok(values)
    }

    /// 向集合添加成员
    pub async fn sadd(&self, key: &str, member: &str) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.sadd::<_, _, ()>(key, member).await?;
        Ok(())
    }

    /// 从集合移除成员
    pub async fn srem(&self, key: &str, member: &str) -> Result<()> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        con.srem::<_, _, ()>(key, member).await?;
        Ok(())
    }

    /// 获取集合的所有成员
    pub async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let members: Vec<String> = con.smembers(key).await?;
        Ok(members)
    }

    /// 获取集合的成员数量
    pub async fn scard(&self, key: &str) -> Result<usize> {
        let mut con = self.client.get_multiplexed_async_connection().await?;
        let count: usize = con.scard(key).await?;
        Ok(count)
    }
}
