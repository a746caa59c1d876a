// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::user_dto::UserRequest;
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::models::user::{Role, User};
use crate::domain::repositories::order_repository::OrderRepository;
use crate::domain::repositories::user_repository::{UserFilter, UserRepository};
use crate::domain::repositories::RepositoryError;
use crate::domain::services::auth_service::{hash_password, HashError};
use crate::infrastructure::cache::cache_manager::{CacheManager, USERS_CACHE};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// 用户服务错误
#[derive(Error, Debug)]
pub enum UserError {
    /// 用户不存在
    #[error("User with id {0} not found")]
    NotFound(i64),
    /// 用户名或邮箱已被使用
    #[error("{0}")]
    Conflict(String),
    /// 创建用户时未提供密码
    #[error("A password is required")]
    MissingPassword,
    /// 密码哈希失败
    #[error(transparent)]
    PasswordHash(#[from] HashError),
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 用户服务
pub struct UsersService {
    repository: Arc<dyn UserRepository>,
    orders: Arc<dyn OrderRepository>,
    cache: Arc<CacheManager>,
}

impl UsersService {
    /// 创建新的用户服务实例
    pub fn new(
        repository: Arc<dyn UserRepository>,
        orders: Arc<dyn OrderRepository>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            repository,
            orders,
            cache,
        }
    }

    /// 按用户名、邮箱和删除状态分页查询用户
    pub async fn find_all(
        &self,
        username: Option<String>,
        email: Option<String>,
        is_deleted: Option<bool>,
        page: &PageRequest,
    ) -> Result<Page<User>, UserError> {
        info!(
            "Finding users with username: {:?}, email: {:?}, is_deleted: {:?}",
            username, email, is_deleted
        );
        let filter = UserFilter {
            username: username.filter(|u| !u.trim().is_empty()),
            email: email.filter(|e| !e.trim().is_empty()),
            is_deleted,
        };
        Ok(self.repository.find_all(filter, page).await?)
    }

    /// 根据ID查找用户
    pub async fn find_user(&self, id: i64) -> Result<User, UserError> {
        if let Some(user) = self.cache.get::<User>(USERS_CACHE, id).await {
            return Ok(user);
        }

        let user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))?;
        self.cache.put(USERS_CACHE, id, &user).await;
        Ok(user)
    }

    /// 根据ID查找用户及其订单ID
    pub async fn find_by_id(&self, id: i64) -> Result<(User, Vec<Uuid>), UserError> {
        info!("Finding user by id: {}", id);
        let user = self.find_user(id).await?;
        let orders = self.orders.find_ids_by_user_id(id).await?;
        Ok((user, orders))
    }

    /// 创建用户，未指定角色时为普通用户
    pub async fn save(&self, request: UserRequest) -> Result<User, UserError> {
        info!("Saving user: {}", request.username);
        self.ensure_available(&request.username, &request.email, None)
            .await?;

        let password = request
            .password
            .as_deref()
            .ok_or(UserError::MissingPassword)?;
        let now = Utc::now();
        let user = User {
            id: None,
            name: request.name,
            surname: request.surname,
            username: request.username,
            email: request.email,
            password: hash_password(password)?,
            roles: parse_roles(request.roles),
            created_at: now,
            updated_at: now,
            is_deleted: request.is_deleted.unwrap_or(false),
        };

        let saved = self.repository.save(&user).await?;
        self.cache_result(&saved).await;
        Ok(saved)
    }

    /// 更新用户，提供密码时重新哈希
    pub async fn update(&self, id: i64, request: UserRequest) -> Result<User, UserError> {
        info!("Updating user by id: {}", id);
        let mut user = self.find_user(id).await?;
        self.ensure_available(&request.username, &request.email, Some(id))
            .await?;

        user.name = request.name;
        user.surname = request.surname;
        user.username = request.username;
        user.email = request.email;
        if let Some(password) = request.password.as_deref() {
            user.password = hash_password(password)?;
        }
        if request.roles.is_some() {
            user.roles = parse_roles(request.roles);
        }
        if let Some(is_deleted) = request.is_deleted {
            user.is_deleted = is_deleted;
        }
        user.updated_at = Utc::now();

        let saved = self.repository.save(&user).await?;
        self.cache_result(&saved).await;
        Ok(saved)
    }

    /// 删除用户
    ///
    /// 有订单的用户只做逻辑删除
    pub async fn delete_by_id(&self, id: i64) -> Result<(), UserError> {
        info!("Deleting user by id: {}", id);
        self.find_user(id).await?;

        if self.orders.exists_by_user_id(id).await? {
            info!("User {} has orders, marking as deleted", id);
            self.repository.update_is_deleted_to_true_by_id(id).await?;
        } else {
            self.repository.delete_by_id(id).await?;
        }
        self.cache.evict(USERS_CACHE, id).await;
        Ok(())
    }

    async fn ensure_available(
        &self,
        username: &str,
        email: &str,
        own_id: Option<i64>,
    ) -> Result<(), UserError> {
        let taken = self
            .repository
            .find_by_username_or_email_ignore_case(username, email)
            .await?
            .into_iter()
            .any(|user| user.id != own_id);

        if taken {
            warn!("Username {} or email {} already in use", username, email);
            return Err(UserError::Conflict(
                "The username or email is already in use".to_string(),
            ));
        }
        Ok(())
    }

    async fn cache_result(&self, user: &User) {
        if let Some(id) = user.id {
            self.cache.put(USERS_CACHE, id, user).await;
        }
    }
}

fn parse_roles(roles: Option<Vec<String>>) -> Vec<Role> {
    let parsed: Vec<Role> = roles
        .unwrap_or_default()
        .iter()
        .filter_map(|role| role.parse().ok())
        .collect();
    if parsed.is_empty() {
        vec![Role::User]
    } else {
        parsed
    }
}
