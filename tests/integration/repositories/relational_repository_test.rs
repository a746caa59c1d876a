// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use storefront::config::settings::Settings;
use storefront::domain::models::page::PageRequest;
use storefront::domain::repositories::category_repository::{CategoryFilter, CategoryRepository};
use storefront::domain::repositories::product_repository::ProductRepository;
use storefront::domain::repositories::user_repository::{UserFilter, UserRepository};
use storefront::infrastructure::database::connection::connect_and_migrate;
use storefront::infrastructure::database::seed::seed_demo_data;
use storefront::infrastructure::repositories::category_repo_impl::CategoryRepoImpl;
use storefront::infrastructure::repositories::product_repo_impl::ProductRepoImpl;
use storefront::infrastructure::repositories::user_repo_impl::UserRepoImpl;

async fn seeded_db() -> Arc<DatabaseConnection> {
    let settings = Settings::defaults().expect("Failed to load default settings");
    let db = Arc::new(
        connect_and_migrate(&settings.database)
            .await
            .expect("Failed to migrate database"),
    );
    seed_demo_data(db.clone()).await.expect("Failed to seed");
    db
}

#[tokio::test]
async fn test_seed_is_idempotent() {
    let db = seeded_db().await;
    seed_demo_data(db.clone()).await.unwrap();

    let categories = CategoryRepoImpl::new(db);
    let page = categories
        .find_all(CategoryFilter::default(), &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_elements, 5);
}

#[tokio::test]
async fn test_category_filters_and_soft_delete() {
    let categories = CategoryRepoImpl::new(seeded_db().await);

    let page = categories
        .find_all(
            CategoryFilter {
                name: Some("o".to_string()),
                is_deleted: None,
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    let names: Vec<_> = page.content.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["SPORTS", "FOOD", "ACCESSORIES", "OTHERS"]);

    let food = categories
        .find_by_name_ignore_case("food")
        .await
        .unwrap()
        .unwrap();
    assert!(categories
        .exists_product_by_id(food.id.unwrap())
        .await
        .unwrap());

    categories
        .update_is_deleted_to_true_by_id(food.id.unwrap())
        .await
        .unwrap();
    let deleted = categories
        .find_all(
            CategoryFilter {
                name: None,
                is_deleted: Some(true),
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.total_elements, 1);
    assert_eq!(deleted.content[0].name, "FOOD");
}

#[tokio::test]
async fn test_product_queries() {
    let products = ProductRepoImpl::new(seeded_db().await);

    assert_eq!(products.find_all().await.unwrap().len(), 5);

    let by_brand = products.find_by_brand_contains_ignore_case("NIK").await.unwrap();
    assert_eq!(by_brand.len(), 1);
    assert_eq!(by_brand[0].category.name, "SPORTS");

    let by_category = products
        .find_by_category_contains_ignore_case("sport")
        .await
        .unwrap();
    assert_eq!(by_category.len(), 2);

    let both = products
        .find_by_brand_contains_and_category_ignore_case("a", "sports")
        .await
        .unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].brand, "Adidas");

    let iphone = products.find_by_id(3).await.unwrap().unwrap();
    let by_uuid = products.find_by_uuid(iphone.uuid).await.unwrap().unwrap();
    assert_eq!(by_uuid.id, Some(3));

    products.update_is_deleted_to_true_by_id(3).await.unwrap();
    assert!(products.find_by_id(3).await.unwrap().unwrap().is_deleted);

    products.delete_by_id(3).await.unwrap();
    assert!(!products.exists_by_id(3).await.unwrap());
}

#[tokio::test]
async fn test_user_queries() {
    let users = UserRepoImpl::new(seeded_db().await);

    let page = users
        .find_all(
            UserFilter {
                email: Some("STOREFRONT".to_string()),
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(page.total_elements, 2);

    let admin = users.find_by_username("admin").await.unwrap().unwrap();
    assert!(admin.is_admin());
    assert!(users
        .find_by_email("user@storefront.dev")
        .await
        .unwrap()
        .is_some());

    let matches = users
        .find_by_username_or_email_ignore_case("ADMIN", "USER@storefront.dev")
        .await
        .unwrap();
    assert_eq!(matches.len(), 2);

    users.update_is_deleted_to_true_by_id(2).await.unwrap();
    let active = users
        .find_all(
            UserFilter {
                is_deleted: Some(false),
                ..Default::default()
            },
            &PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(active.total_elements, 1);
}
