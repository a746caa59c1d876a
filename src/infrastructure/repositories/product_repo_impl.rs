// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::product::Product;
use crate::domain::repositories::product_repository::ProductRepository;
use crate::domain::repositories::RepositoryError;
use crate::infrastructure::database::entities::{category, product};
use crate::infrastructure::repositories::category_repo_impl::{lower_contains, lower_equals};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

/// 商品仓库实现
///
/// 商品总是与其分类一起加载
#[derive(Clone)]
pub struct ProductRepoImpl {
    db: Arc<DatabaseConnection>,
}

impl ProductRepoImpl {
    /// 创建新的商品仓库实现
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn find_with_category(
        &self,
        conditions: Vec<SimpleExpr>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let mut query = product::Entity::find().find_also_related(category::Entity);
        for condition in conditions {
            query = query.filter(condition);
        }

        let rows = query
            .order_by_asc(product::Column::Id)
            .all(self.db.as_ref())
            .await?;

        rows.into_iter()
            .map(|(model, category)| into_product(model, category))
            .collect()
    }

    async fn find_one_with_category(
        &self,
        condition: SimpleExpr,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = product::Entity::find()
            .find_also_related(category::Entity)
            .filter(condition)
            .one(self.db.as_ref())
            .await?;

        row.map(|(model, category)| into_product(model, category))
            .transpose()
    }
}

fn category_name_column() -> (category::Entity, category::Column) {
    (category::Entity, category::Column::Name)
}

#[async_trait]
impl ProductRepository for ProductRepoImpl {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        self.find_with_category(Vec::new()).await
    }

    async fn find_by_brand_contains_ignore_case(
        &self,
        brand: &str,
    ) -> Result<Vec<Product>, RepositoryError> {
        self.find_with_category(vec![lower_contains(
            (product::Entity, product::Column::Brand),
            brand,
        )])
        .await
    }

    async fn find_by_category_contains_ignore_case(
        &self,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError> {
        self.find_with_category(vec![lower_contains(category_name_column(), category)])
            .await
    }

    async fn find_by_brand_contains_and_category_ignore_case(
        &self,
        brand: &str,
        category: &str,
    ) -> Result<Vec<Product>, RepositoryError> {
        self.find_with_category(vec![
            lower_contains((product::Entity, product::Column::Brand), brand),
            lower_equals(category_name_column(), category),
        ])
        .await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError> {
        self.find_one_with_category(Expr::col((product::Entity, product::Column::Id)).eq(id))
            .await
    }

    async fn find_by_uuid(&self, uuid: Uuid) -> Result<Option<Product>, RepositoryError> {
        self.find_one_with_category(Expr::col((product::Entity, product::Column::Uuid)).eq(uuid))
            .await
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, RepositoryError> {
        let count = product::Entity::find()
            .filter(product::Column::Id.eq(id))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn save(&self, product: &Product) -> Result<Product, RepositoryError> {
        let category_id = product.category.id.ok_or_else(|| {
            RepositoryError::Database(DbErr::Custom(
                "Product category must be persisted before the product".to_string(),
            ))
        })?;

        let existing = match product.id {
            Some(id) => product::Entity::find_by_id(id)
                .one(self.db.as_ref())
                .await?,
            None => None,
        };

        let mut model = product::ActiveModel {
            id: NotSet,
            uuid: Set(product.uuid),
            brand: Set(product.brand.clone()),
            model: Set(product.model.clone()),
            description: Set(product.description.clone()),
            price: Set(product.price),
            image: Set(product.image.clone()),
            stock: Set(product.stock),
            category_id: Set(category_id),
            created_at: Set(product.created_at.into()),
            updated_at: Set(product.updated_at.into()),
            is_deleted: Set(product.is_deleted),
        };

        let saved = match existing {
            Some(existing) => {
                model.id = Set(existing.id);
                model.update(self.db.as_ref()).await?
            }
            None => model.insert(self.db.as_ref()).await?,
        };

        self.find_by_id(saved.id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        product::Entity::delete_by_id(id)
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }

    async fn update_is_deleted_to_true_by_id(&self, id: i64) -> Result<(), RepositoryError> {
        let result = product::Entity::update_many()
            .col_expr(product::Column::IsDeleted, Expr::value(true))
            .col_expr(
                product::Column::UpdatedAt,
                Expr::value(chrono::DateTime::<chrono::FixedOffset>::from(chrono::Utc::now())),
            )
            .filter(product::Column::Id.eq(id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

fn into_product(
    model: product::Model,
    category: Option<category::Model>,
) -> Result<Product, RepositoryError> {
    let category: Category = category
        .ok_or_else(|| {
            RepositoryError::Database(DbErr::RecordNotFound(format!(
                "Category {} of product {}",
                model.category_id, model.id
            )))
        })?
        .into();

    Ok(Product {
        id: Some(model.id),
        uuid: model.uuid,
        brand: model.brand,
        model: model.model,
        description: model.description,
        price: model.price,
        image: model.image,
        stock: model.stock,
        category,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
        is_deleted: model.is_deleted,
    })
}
