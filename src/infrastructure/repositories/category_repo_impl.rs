// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::page::{Page, PageRequest, SortDirection};
use crate::domain::repositories::category_repository::{CategoryFilter, CategoryRepository};
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{category, product};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, Order, SimpleExpr};
use sea_orm::*;
use std::str::FromStr;
use std::sync::Arc;

/// 分类仓库实现
#[derive(Clone)]
pub struct CategoryRepoImpl {
    db: Arc<DatabaseConnection>,
}

impl CategoryRepoImpl {
    /// 创建新的分类仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// 将排序方向转换为查询排序
pub(crate) fn to_order(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

/// 构造忽略大小写的“包含”条件
pub(crate) fn lower_contains<C: IntoColumnRef>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(format!("%{}%", value.to_lowercase()))
}

/// 构造忽略大小写的相等条件
pub(crate) fn lower_equals<C: IntoColumnRef>(column: C, value: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).eq(value.to_lowercase())
}

#[async_trait]
impl CategoryRepository for CategoryRepoImpl {
    async fn find_all(
        &self,
        filter: CategoryFilter,
        page: &PageRequest,
    ) -> Result<Page<Category>, RepositoryError> {
        let mut query = category::Entity::find();

        if let Some(name) = filter.name.as_deref() {
            query = query.filter(lower_contains(category::Column::Name, name));
        }
        if let Some(is_deleted) = filter.is_deleted {
            query = query.filter(category::Column::IsDeleted.eq(is_deleted));
        }

        let sort_column =
            category::Column::from_str(&page.sort_by).unwrap_or(category::Column::Id);
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

    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepositoryError> {
        let model = category::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_by_name_ignore_case(
        &self,
        name: &str,
    ) -> Result<Option<Category>, RepositoryError> {
        let model = category::Entity::find()
            .filter(lower_equals(category::Column::Name, name))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn save(&self, category: &Category) -> Result<Category, RepositoryError> {
        let existing = match category.id {
            Some(id) => category::Entity::find_by_id(id)
                .one(self.db.as_ref())
                .await?,
            None => None,
        };

        let mut model = category::ActiveModel {
            id: NotSet,
            name: Set(category.name.clone()),
            created_at: Set(category.created_at.into()),
            updated_at: Set(category.updated_at.into()),
            is_deleted: Set(category.is_deleted),
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
        category::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn exists_product_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let count = product::Entity::find()
            .filter(product::Column::CategoryId.eq(id))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn update_is_deleted_to_true_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let result = category::Entity::update_many()
            .col_expr(category::Column::IsDeleted, Expr::value(true))
            .col_expr(
                category::Column::UpdatedAt,
                Expr::value(chrono::DateTime::<chrono::FixedOffset>::from(chrono::Utc::now())),
            )
            .filter(category::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

impl From<category::Model> for Category {
    fn from(model: category::Model) -> Self {
        Self {
            id: Some(model.id),
            name: model.name,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            is_deleted: model.is_deleted,
        }
    }
}
