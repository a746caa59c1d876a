// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 收货地址
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub number: String,
    pub city: String,
    pub province: String,
    pub country: String,
    pub postal_code: String,
}

/// 下单客户信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: Address,
}

/// 订单行
///
/// `product_price` 必须与商品当前价格一致，`total` 在预留库存时计算。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub quantity: i32,
    pub product_id: i64,
    pub product_price: f64,
    #[serde(default)]
    pub total: f64,
}

impl OrderLine {
    /// 按数量和单价计算行总价
    pub fn compute_total(&self) -> f64 {
        self.product_price * f64::from(self.quantity)
    }
}

/// 订单文档
///
/// 订单不参与关系型存储，以完整文档的形式保存在文档存储中。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// 订单ID
    pub id: Uuid,
    /// 下单用户ID
    pub user_id: i64,
    /// 客户信息
    pub customer: Customer,
    /// 订单行
    pub lines: Vec<OrderLine>,
    /// 商品总件数
    pub total_items: i32,
    /// 订单总金额
    pub total: f64,
    /// 创建时间
    pub created_at: DateTime<Utc>,
    /// 更新时间
    pub updated_at: DateTime<Utc>,
    /// 是否已逻辑删除
    pub is_deleted: bool,
}

impl Order {
    /// 创建一个新的订单，合计字段在库存预留后填充
    pub fn new(user_id: i64, customer: Customer, lines: Vec<OrderLine>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            customer,
            lines,
            total_items: 0,
            total: 0.0,
            created_at: now,
            updated_at: now,
            is_deleted: false,
        }
    }

    /// 重新计算每一行以及订单的合计
    pub fn recalculate_totals(&mut self) {
        for line in &mut self.lines {
            line.total = line.compute_total();
        }
        self.total_items = self.lines.iter().map(|line| line.quantity).sum();
        self.total = self.lines.iter().map(|line| line.total).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_recalculate_totals() {
        let mut order = Order::new(
            1,
            customer(),
            vec![
                OrderLine {
                    quantity: 2,
                    product_id: 1,
                    product_price: 10.5,
                    total: 0.0,
                },
                OrderLine {
                    quantity: 3,
                    product_id: 2,
                    product_price: 1.0,
                    total: 0.0,
                },
            ],
        );

        order.recalculate_totals();

        assert_eq!(order.lines[0].total, 21.0);
        assert_eq!(order.total_items, 5);
        assert_eq!(order.total, 24.0);
    }
}
