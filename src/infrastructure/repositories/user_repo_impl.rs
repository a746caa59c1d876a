// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::page::{Page, PageRequest};
use crate::domain::models::user::{decode_roles, encode_roles, User};
use crate::domain::repositories::user_repository::{UserFilter, UserRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::user;
use crate::infrastructure::repositories::category_repo_impl::{
    lower_contains, lower_equals, to_order,
};
use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::str::FromStr;
use std::sync::Arc;

/// 用户仓库实现
#[derive(Clone)]
pub struct UserRepoImpl {
    db: Arc<DatabaseConnection>,
}

impl UserRepoImpl {
    /// 创建新的用户仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepoImpl {
    async fn find_all(
        &self,
        filter: UserFilter,
        page: &PageRequest,
    ) -> Result<Page<User>, RepositoryError> {
        let mut query = user::Entity::find();

        if let Some(username) = filter.username.as_deref() {
            query = query.filter(lower_contains(user::Column::Username, username));
        }
        if let Some(email) = filter.email.as_deref() {
            query = query.filter(lower_contains(user::Column::Email, email));
        }
        if let Some(is_deleted) = filter.is_deleted {
            query = query.filter(user::Column::IsDeleted.eq(is_deleted));
        }

        // Never sort by the password hash
        let sort_column = match user::Column::from_str(&page.sort_by) {
            Ok(user::Column::Password) | Err(_) => user::Column::Id,
            Ok(column) => column,
        };
        let paginator = query
            .order_by(sort_column, to_order(page.direction))
            .paginate(self.db.as_ref(), page.size);

        let total_elements = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page).await?;

        Ok(Page {
            content: models.into_iter().map(Into::into).collect(),
            total_elements,
            page: page.page,
            size: page.size,
        })
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find_by_id(id).one(self.db.as_ref()).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_username_or_email_ignore_case(
        &self,
        username: &str,
        email: &str,
    ) -> Result<Vec<User>, RepositoryError> {
        let models = user::Entity::find()
            .filter(
                Condition::any()
                    .add(lower_equals(user::Column::Username, username))
                    .add(lower_equals(user::Column::Email, email)),
            )
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn save(&self, user: &User) -> Result<User, RepositoryError> {
        let existing = match user.id {
            Some(id) => user::Entity::find_by_id(id).one(self.db.as_ref()).await?,
            None => None,
        };

        let mut model = user::ActiveModel {
            id: NotSet,
            name: Set(user.name.clone()),
            surname: Set(user.surname.clone()),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password: Set(user.password.clone()),
            roles: Set(encode_roles(&user.roles)),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
            is_deleted: Set(user.is_deleted),
        };

        let saved = match existing {
            Some(existing) => {
                model.id = Set(existing.id);
                model.update(self.db.as_ref()).await?
            }
            None => model.insert(self.db.as_ref()).await?,
        };

        Ok(saved.into())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        user::Entity::delete_by_id(id).exec(self.db.as_ref()).await?;
        Ok(())
    }

    async fn update_is_deleted_to_true_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::IsDeleted, Expr::value(true))
            .col_expr(
                user::Column::UpdatedAt,
                Expr::value(chrono::DateTime::<chrono::FixedOffset>::from(chrono::Utc::now())),
            )
            .filter(user::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl From<user::Model> for User {
    fn from(model: user::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            surname: model.surname,
            username: model.username,
            email: model.email,
            password: model.password,
            roles: decode_roles(&model.roles),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            is_deleted: model.is_deleted,
        }
    }
}
