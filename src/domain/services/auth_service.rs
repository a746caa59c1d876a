// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::auth_dto::{JwtAuthResponse, SignInRequest, SignUpRequest};
use crate::config::settings::JwtSettings;
use crate::domain::models::user::{Role, User};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::RepositoryError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// 密码哈希失败
#[derive(Error, Debug)]
#[error("Hashing failed: {0}")]
pub struct HashError(#[from] argon2::password_hash::Error);

/// 使用 Argon2 生成密码哈希（PHC 字符串）
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// 校验密码与哈希是否匹配，哈希格式错误视为不匹配
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!("Invalid password hash format: {}", e);
            false
        }
    }
}

/// JWT 声明
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// 用户名
    pub sub: String,
    /// 过期时间（UTC 时间戳）
    pub exp: usize,
    /// 签发时间
    pub iat: usize,
}

/// 认证错误
#[derive(Error, Debug)]
pub enum AuthError {
    /// 注册数据不合法
    #[error("{0}")]
    InvalidSignUp(String),
    /// 用户名或邮箱已被使用
    #[error("The username or email is already in use")]
    UserExists,
    /// 用户名或密码错误
    #[error("Invalid username or password")]
    InvalidCredentials,
    /// 令牌无效或已过期
    #[error("Invalid token: {0}")]
    InvalidToken(String),
    /// 密码哈希失败
    #[error(transparent)]
    Hash(#[from] HashError),
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 认证服务
///
/// 负责注册、登录以及 JWT 的签发与校验
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_secret: String,
    expiration: Duration,
}

impl AuthService {
    /// 创建新的认证服务实例
    pub fn new(users: Arc<dyn UserRepository>, settings: &JwtSettings) -> Self {
        Self {
            users,
            jwt_secret: settings.secret.clone(),
            expiration: Duration::seconds(settings.expiration_seconds),
        }
    }

    /// 注册普通用户并返回令牌
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<JwtAuthResponse, AuthError> {
        info!("Signing up user: {}", request.username);
        if request.password != request.password_confirmation {
            return Err(AuthError::InvalidSignUp(
                "The passwords do not match".to_string(),
            ));
        }

        let existing = self
            .users
            .find_by_username_or_email_ignore_case(&request.username, &request.email)
            .await?;
        if !existing.is_empty() {
            warn!("Sign up rejected, user {} already exists", request.username);
            return Err(AuthError::UserExists);
        }

        let now = Utc::now();
        let user = User {
            id: None,
            name: request.name,
            surname: request.surname,
            username: request.username,
            email: request.email,
            password: hash_password(&request.password)?,
            roles: vec![Role::User],
            created_at: now,
            updated_at: now,
            is_deleted: false,
        };
        let saved = self.users.save(&user).await?;

        Ok(JwtAuthResponse {
            token: self.generate_token(&saved.username)?,
        })
    }

    /// 登录并返回令牌
    pub async fn sign_in(&self, request: SignInRequest) -> Result<JwtAuthResponse, AuthError> {
        info!("Signing in user: {}", request.username);
        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .filter(|user| !user.is_deleted)
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(JwtAuthResponse {
            token: self.generate_token(&user.username)?,
        })
    }

    /// 为用户名签发令牌
    pub fn generate_token(&self, username: &str) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: username.to_string(),
            exp: (now + self.expiration).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// 校验令牌
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.jwt_secret.as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// 根据令牌加载当前用户，已删除的用户视为无效
    pub async fn authenticate(&self, token: &str) -> Result<User, AuthError> {
        let claims = self.verify_token(token)?;
        debug!("Authenticating user: {}", claims.sub);

        self.users
            .find_by_username(&claims.sub)
            .await?
            .filter(|user| !user.is_deleted)
            .ok_or_else(|| AuthError::InvalidToken(format!("User {} not found", claims.sub)))
    }
}
