// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::page::{Page, PageRequest};
use crate::domain::models::user::User;
use crate::domain::repositories::RepositoryError;
use async_trait::async_trait;

/// 用户查询条件
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    /// 用户名包含（忽略大小写）
    pub username: Option<String>,
    /// 邮箱包含（忽略大小写）
    pub email: Option<String>,
    /// 是否已逻辑删除
    pub is_deleted: Option<bool>,
}

/// 用户仓库特质
///
/// 定义用户数据访问接口
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 按条件分页查询用户
    async fn find_all(
        &self,
        filter: UserFilter,
        page: &PageRequest,
    ) -> Result<Page<User>, RepositoryError>;
    /// 根据ID查找用户
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
    /// 根据用户名查找用户
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    /// 查找用户名或邮箱匹配的所有用户（忽略大小写）
    async fn find_by_username_or_email_ignore_case(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Vec<User>, RepositoryError>;
    /// 保存用户，ID为空时插入，否则更新
    async fn save(&self, user: &User) -> Result<User, RepositoryError>;
    /// 根据ID删除用户
    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError>;
    /// 将用户标记为已删除
    async fn update_is_deleted_to_true_by_id(&self, id: i64) -> Result<(), RepositoryError>;
}
