// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::Category;
use crate::domain::models::page::PageRequest;
use crate::domain::models::product::Product;
use crate::domain::models::user::{Role, User};
use crate::domain::repositories::category_repository::{CategoryFilter, CategoryRepository};
use crate::domain::repositories::product_repository::ProductRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::auth_service::hash_password;
use crate::infrastructure::repositories::category_repo_impl::CategoryRepoImpl;
use crate::infrastructure::repositories::product_repo_impl::ProductRepoImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepoImpl;
use anyhow::{anyhow, Result};
use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

const CATEGORIES: [&str; 5] = ["SPORTS", "FOOD", "DRINKS", "ACCESSORIES", "OTHERS"];

/// (品牌, 型号, 描述, 价格, 库存, 分类)
const PRODUCTS: [(&str, &str, &str, f64, i32, &str); 5] = [
    ("Adidas", "Trainers", "Running trainers", 100.0, 5, "SPORTS"),
    ("Nike", "T-shirt", "Training t-shirt", 50.0, 10, "SPORTS"),
    ("Apple", "iPhone", "Mobile phone", 1000.0, 2, "ACCESSORIES"),
    ("Cola", "Soda", "Can of soda", 1.5, 100, "DRINKS"),
    ("Bakery", "Bread", "Wholemeal sliced bread", 2.25, 30, "FOOD"),
];

const DEMO_PASSWORD: &str = "password";

/// 写入演示数据
///
/// 已存在分类时跳过，保证多次启动不会重复写入
pub async fn seed_demo_data(db: Arc<DatabaseConnection>) -> Result<()> {
    let categories = CategoryRepoImpl::new(db.clone());
    let existing = categories
        .find_all(CategoryFilter::default(), &PageRequest::default())
        .await?;
    if existing.total_elements > 0 {
        info!("Demo data already present, skipping seed");
        return Ok(());
    }

    let mut saved_categories = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        saved_categories.push(categories.save(&Category::new(name)).await?);
    }

    let products = ProductRepoImpl::new(db.clone());
    for (brand, model, description, price, stock, category) in PRODUCTS {
        let category = saved_categories
            .iter()
            .find(|c| c.name == category)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown seed category {}", category))?;
        let now = Utc::now();
        products
            .save(&Product {
                id: None,
                uuid: Uuid::new_v4(),
                brand: brand.to_string(),
                model: model.to_string(),
                description: description.to_string(),
                price,
                image: Product::IMAGE_DEFAULT.to_string(),
                stock,
                category,
                created_at: now,
                updated_at: now,
                is_deleted: false,
            })
            .await?;
    }

    let users = UserRepoImpl::new(db);
    let password = hash_password(DEMO_PASSWORD)?;
    for (username, roles) in [
        ("admin", vec![Role::Admin, Role::User]),
        ("user", vec![Role::User]),
    ] {
        let now = Utc::now();
        users
            .save(&User {
                id: None,
                name: username.to_string(),
                surname: username.to_string(),
                username: username.to_string(),
                email: format!("{}@storefront.dev", username),
                password: password.clone(),
                roles,
                created_at: now,
                updated_at: now,
                is_deleted: false,
            })
            .await?;
    }

    info!(
        "Seeded {} categories, {} products and 2 users",
        CATEGORIES.len(),
        PRODUCTS.len()
    );
    Ok(())
}
