// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// 将角色集合编码为逗号分隔的字符串
pub fn encode_roles(roles: &[Role]) -> String {
    roles
        .iter()
        .map(Role::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// 解析逗号分隔的角色字符串，忽略无法识别的值
pub fn decode_roles(raw: &str) -> Vec<Role> {
    raw.split(',')
        .filter(|s| !s.trim().is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

/// 系统用户实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// 用户ID，新建时为 None
    pub id: Option<i64>,
    /// 名
    pub name: String,
    /// 姓
    pub surname: String,
    /// 用户名
    pub username: String,
    /// 邮箱
    pub email: String,
    /// 密码哈希
    pub password: String,
    /// 角色集合
    pub roles: Vec<Role>,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
    /// 是否已逻辑删除
    pub is_deleted: bool,
}

impl User {
    /// 是否拥有管理员角色
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}
