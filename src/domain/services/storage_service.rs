// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};

/// 存储服务
///
/// 在存储后端之上负责文件命名、合法性校验和对外URL
pub struct StorageService {
    repository: Arc<dyn StorageRepository>,
    base_url: String,
}

impl StorageService {
    /// 创建新的存储服务实例
    pub fn new(repository: Arc<dyn StorageRepository>, base_url: impl Into<String>) -> Self {
        Self {
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// 保存文件并返回存储名
    ///
    /// 存储名格式为 `{毫秒时间戳}_{清洗后的原始文件名}`
    pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<String, StorageError> {
        if data.is_empty() {
            return Err(StorageError::BadRequest(format!(
                "Cannot store an empty file {}",
                original_name
            )));
        }
        if original_name.contains("..") {
            return Err(StorageError::BadRequest(format!(
                "Cannot store a file with a relative path outside the current directory {}",
                original_name
            )));
        }

        let stored_name = format!(
            "{}_{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(original_name)
        );
        self.repository.save(&stored_name, data).await?;

        info!("Stored file {} as {}", original_name, stored_name);
        Ok(stored_name)
    }

    /// 读取文件内容
    pub async fn load(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        check_stored_name(name)?;
        self.repository
            .get(name)
            .await?
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    /// 删除文件，文件不存在时同样成功
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        check_stored_name(name)?;
        debug!("Deleting stored file {}", name);
        self.repository.delete(name).await
    }

    /// 文件的对外访问地址
    pub fn url(&self, name: &str) -> String {
        format!("{}/storage/{}", self.base_url, name)
    }

    /// 由商品图片字段得到本服务保存的存储名
    ///
    /// 图片可以是存储名或本服务的访问地址，其余外部地址返回 `None`
    pub fn stored_name_of<'a>(&self, image: &'a str) -> Option<&'a str> {
        let prefix = format!("{}/storage/", self.base_url);
        let name = match image.strip_prefix(prefix.as_str()) {
            Some(name) => name,
            None if image.contains("://") => return None,
            None => image,
        };
        check_stored_name(name).ok().map(|_| name)
    }

    /// 删除全部文件
    pub async fn delete_all(&self) -> Result<(), StorageError> {
        info!("Deleting all stored files");
        self.repository.delete_all().await
    }

    /// 初始化存储
    pub async fn init(&self) -> Result<(), StorageError> {
        self.repository.init().await
    }
}

/// 存储名只能是单层文件名
fn check_stored_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(StorageError::BadRequest(format!("Invalid file name {}", name)));
    }
    Ok(())
}

/// 清洗文件名：去掉目录部分，空白替换为下划线
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

/// 根据文件扩展名推断内容类型
pub fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "json" => "application/json",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
