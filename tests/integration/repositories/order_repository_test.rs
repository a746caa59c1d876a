// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use storefront::domain::models::order::{Address, Customer, Order, OrderLine};
use storefront::domain::models::page::{PageRequest, SortDirection};
use storefront::domain::repositories::order_repository::OrderRepository;
use storefront::infrastructure::repositories::order_memory_repo::InMemoryOrderRepository;

fn customer() -> Customer {
    Customer {
        full_name: "Jane Doe".to_string(),
        email: "jane@example.com".to_string(),
        phone: "600000000".to_string(),
        address: Address {
            street: "Main".to_string(),
            number: "1".to_string(),
            city: "Madrid".to_string(),
            province: "Madrid".to_string(),
            country: "Spain".to_string(),
            postal_code: "28001".to_string(),
        },
    }
}

fn order(user_id: i64, quantity: i32, price: f64) -> Order {
    let mut order = Order::new(
        user_id,
        customer(),
        vec![OrderLine {
            quantity,
            product_id: 1,
            product_price: price,
            total: 0.0,
        }],
    );
    order.recalculate_totals();
    order
}

async fn seeded() -> (InMemoryOrderRepository, Vec<Order>) {
    let repository = InMemoryOrderRepository::new();
    let orders = vec![order(1, 1, 10.0), order(1, 3, 5.0), order(2, 2, 100.0)];
    for order in &orders {
        repository.save(order).await.unwrap();
    }
    (repository, orders)
}

#[tokio::test]
async fn test_find_all_sorted_and_paged() {
    let (repository, _) = seeded().await;

    let request = PageRequest::new(0, 2, "total", SortDirection::Desc);
    let page = repository.find_all(&request).await.unwrap();
    assert_eq!(page.total_elements, 3);
    assert_eq!(page.total_pages(), 2);
    let totals: Vec<f64> = page.content.iter().map(|o| o.total).collect();
    assert_eq!(totals, vec![200.0, 15.0]);

    let second = repository
        .find_all(&PageRequest::new(1, 2, "total", SortDirection::Desc))
        .await
        .unwrap();
    assert_eq!(second.content.len(), 1);
    assert_eq!(second.content[0].total, 10.0);
}

#[tokio::test]
async fn test_unknown_sort_field_falls_back() {
    let (repository, _) = seeded().await;

    let page = repository
        .find_all(&PageRequest::new(0, 10, "unknown", SortDirection::Asc))
        .await
        .unwrap();
    assert_eq!(page.content.len(), 3);
    assert!(page
        .content
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
}

#[tokio::test]
async fn test_user_queries() {
    let (repository, orders) = seeded().await;

    let page = repository
        .find_by_user_id(1, &PageRequest::new(0, 10, "total_items", SortDirection::Asc))
        .await
        .unwrap();
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.content[0].total_items, 1);

    let mut ids = repository.find_ids_by_user_id(1).await.unwrap();
    ids.sort();
    let mut expected = vec![orders[0].id, orders[1].id];
    expected.sort();
    assert_eq!(ids, expected);

    assert!(repository.exists_by_user_id(2).await.unwrap());
    assert!(!repository.exists_by_user_id(3).await.unwrap());
}

#[tokio::test]
async fn test_save_overwrites_and_delete_removes() {
    let (repository, orders) = seeded().await;

    let mut changed = orders[2].clone();
    changed.user_id = 3;
    repository.save(&changed).await.unwrap();

    let found = repository.find_by_id(changed.id).await.unwrap().unwrap();
    assert_eq!(found.user_id, 3);
    assert!(!repository.exists_by_user_id(2).await.unwrap());

    repository.delete_by_id(changed.id).await.unwrap();
    assert!(repository.find_by_id(changed.id).await.unwrap().is_none());
    assert_eq!(
        repository
            .find_all(&PageRequest::default())
            .await
            .unwrap()
            .total_elements,
        2
    );
}
