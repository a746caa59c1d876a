// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use storefront::domain::models::order::{Address, Customer, Order, OrderLine};
use storefront::domain::models::page::{PageRequest, SortDirection};
use storefront::domain::repositories::order_repository::OrderRepository;
use storefront::infrastructure::cache::redis_client::RedisClient;
use storefront::infrastructure::repositories::order_redis_repo::RedisOrderRepository;
use uuid::Uuid;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

fn order(user_id: i64) -> Order {
    let customer = Customer {
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
    };
    let mut order = Order::new(
        user_id,
        customer,
        vec![OrderLine {
            quantity: 2,
            product_id: 1,
            product_price: 10.0,
            total: 0.0,
        }],
    );
    order.recalculate_totals();
    order
}

async fn members(client: &RedisClient, key: &str) -> Vec<String> {
    let mut members = client.smembers(key).await.unwrap();
    members.sort();
    members
}

#[tokio::test]
#[ignore] // Requires Redis running
async fn test_redis_indexes_follow_save_user_change_and_delete() {
    let client = Arc::new(RedisClient::new(&redis_url()).await.unwrap());
    let prefix = format!("orders-test-{}", Uuid::new_v4());
    let repository = RedisOrderRepository::new(client.clone(), prefix.clone());
    let ids_key = format!("{}:ids", prefix);
    let user_key = |user_id: i64| format!("{}:user:{}", prefix, user_id);

    let mut first = order(1);
    let second = order(1);
    repository.save(&first).await.unwrap();
    repository.save(&second).await.unwrap();

    let mut both = vec![first.id.to_string(), second.id.to_string()];
    both.sort();
    assert_eq!(members(&client, &ids_key).await, both);
    assert_eq!(members(&client, &user_key(1)).await, both);
    assert!(client
        .get(&format!("{}:{}", prefix, first.id))
        .await
        .unwrap()
        .is_some());

    // Moving an order to another user updates both user sets
    first.user_id = 2;
    repository.save(&first).await.unwrap();
    assert_eq!(members(&client, &ids_key).await, both);
    assert_eq!(members(&client, &user_key(1)).await, vec![second.id.to_string()]);
    assert_eq!(members(&client, &user_key(2)).await, vec![first.id.to_string()]);
    assert_eq!(repository.find_ids_by_user_id(2).await.unwrap(), vec![first.id]);

    let request = PageRequest::new(0, 10, "id", SortDirection::Asc);
    let page = repository.find_by_user_id(1, &request).await.unwrap();
    assert_eq!(page.total_elements, 1);
    assert_eq!(page.content[0].id, second.id);

    repository.delete_by_id(first.id).await.unwrap();
    assert_eq!(members(&client, &ids_key).await, vec![second.id.to_string()]);
    assert!(members(&client, &user_key(2)).await.is_empty());
    assert!(!repository.exists_by_user_id(2).await.unwrap());
    assert!(repository.find_by_id(first.id).await.unwrap().is_none());

    // Deleting a missing order leaves the indexes untouched
    repository.delete_by_id(first.id).await.unwrap();
    assert_eq!(members(&client, &ids_key).await, vec![second.id.to_string()]);

    repository.delete_by_id(second.id).await.unwrap();
    assert!(members(&client, &ids_key).await.is_empty());
    assert!(members(&client, &user_key(1)).await.is_empty());
    client.del_by_pattern(&format!("{}:*", prefix)).await.unwrap();
}
