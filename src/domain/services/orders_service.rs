// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::order_dto::OrderRequest;
use crate::domain::models::order::{Order, OrderLine};
use crate::domain::models::page::{Page, PageRequest};
use crate::domain::models::product::Product;
use crate::domain::repositories::order_repository::OrderRepository;
use crate::domain::repositories::product_repository::ProductRepository;
use crate::domain::repositories::RepositoryError;
use crate::domain::services::products_service::evict_product;
use crate::infrastructure::cache::cache_manager::CacheManager;
use chrono::Utc;
use metrics::counter;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

/// 订单服务错误
#[derive(Error, Debug)]
pub enum OrderError {
    /// 订单不存在
    #[error("Order with id {0} not found")]
    NotFound(Uuid),
    /// 订单没有订单行
    #[error("The order has no items")]
    NotItems,
    /// 订单行引用的商品不存在
    #[error("Product with id {0} not found")]
    ProductNotFound(i64),
    /// 库存不足
    #[error("Product with id {0} does not have enough stock")]
    ProductNotStock(i64),
    /// 订单行价格与商品价格不一致
    #[error("The price of product {0} does not match the order line")]
    ProductBadPrice(i64),
    /// 仓库错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 订单服务
///
/// 订单创建时预留库存，更新或删除时先归还原订单占用的库存。
/// 库存校验与修改在同一把异步锁内完成。
pub struct OrdersService {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    cache: Arc<CacheManager>,
    stock_lock: Mutex<()>,
}

impl OrdersService {
    /// 创建新的订单服务实例
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        cache: Arc<CacheManager>,
    ) -> Self {
        Self {
            orders,
            products,
            cache,
            stock_lock: Mutex::new(()),
        }
    }

    /// 分页查询所有订单
    pub async fn find_all(&self, page: &PageRequest) -> Result<Page<Order>, OrderError> {
        info!("Finding all orders");
        Ok(self.orders.find_all(page).await?)
    }

    /// 根据ID查找订单
    pub async fn find_by_id(&self, id: Uuid) -> Result<Order, OrderError> {
        info!("Finding order by id: {}", id);
        self.orders
            .find_by_id(id)
            .await?
            .ok_or(OrderError::NotFound(id))
    }

    /// 查找属于指定用户的订单，其他用户的订单视为不存在
    pub async fn find_owned(&self, id: Uuid, user_id: i64) -> Result<Order, OrderError> {
        let order = self.find_by_id(id).await?;
        if order.user_id != user_id {
            return Err(OrderError::NotFound(id));
        }
        Ok(order)
    }

    /// 分页查询用户的订单
    pub async fn find_by_user_id(
        &self,
        user_id: i64,
        page: &PageRequest,
    ) -> Result<Page<Order>, OrderError> {
        info!("Finding orders of user: {}", user_id);
        Ok(self.orders.find_by_user_id(user_id, page).await?)
    }

    /// 创建订单并预留库存
    pub async fn save(&self, request: OrderRequest) -> Result<Order, OrderError> {
        info!("Saving order for user: {}", request.user_id);
        let mut order = Order::new(
            request.user_id,
            request.customer.into(),
            request.lines.into_iter().map(Into::into).collect(),
        );

        let _guard = self.stock_lock.lock().await;
        self.check_lines(&order.lines).await?;
        self.reserve_stock(&mut order).await?;

        let saved = self.orders.save(&order).await?;
        counter!("orders_created_total").increment(1);
        Ok(saved)
    }

    /// 更新订单
    ///
    /// 原订单的库存先归还，新订单行校验失败时恢复原来的预留
    pub async fn update(&self, id: Uuid, request: OrderRequest) -> Result<Order, OrderError> {
        info!("Updating order by id: {}", id);
        self.update_scoped(id, None, request).await
    }

    /// 更新属于指定用户的订单
    pub async fn update_owned(
        &self,
        id: Uuid,
        user_id: i64,
        mut request: OrderRequest,
    ) -> Result<Order, OrderError> {
        info!("Updating order {} of user {}", id, user_id);
        request.user_id = user_id;
        self.update_scoped(id, Some(user_id), request).await
    }

    /// 删除订单并归还库存
    pub async fn delete(&self, id: Uuid) -> Result<(), OrderError> {
        info!("Deleting order by id: {}", id);
        self.delete_scoped(id, None).await
    }

    /// 删除属于指定用户的订单
    pub async fn delete_owned(&self, id: Uuid, user_id: i64) -> Result<(), OrderError> {
        info!("Deleting order {} of user {}", id, user_id);
        self.delete_scoped(id, Some(user_id)).await
    }

    /// 在库存锁内读取订单，`owner` 不匹配时视为不存在
    async fn load_for_change(&self, id: Uuid, owner: Option<i64>) -> Result<Order, OrderError> {
        let order = self.find_by_id(id).await?;
        match owner {
            Some(user_id) if order.user_id != user_id => Err(OrderError::NotFound(id)),
            _ => Ok(order),
        }
    }

    async fn update_scoped(
        &self,
        id: Uuid,
        owner: Option<i64>,
        request: OrderRequest,
    ) -> Result<Order, OrderError> {
        let _guard = self.stock_lock.lock().await;
        let current = self.load_for_change(id, owner).await?;
        self.return_stock(&current.lines).await?;

        let mut order = Order {
            user_id: request.user_id,
            customer: request.customer.into(),
            lines: request.lines.into_iter().map(Into::into).collect(),
            updated_at: Utc::now(),
            ..current.clone()
        };

        if let Err(e) = self.check_lines(&order.lines).await {
            warn!("Order {} update rejected, restoring previous stock: {}", id, e);
            let mut previous = current;
            self.reserve_stock(&mut previous).await?;
            return Err(e);
        }
        self.reserve_stock(&mut order).await?;

        Ok(self.orders.save(&order).await?)
    }

    async fn delete_scoped(&self, id: Uuid, owner: Option<i64>) -> Result<(), OrderError> {
        let _guard = self.stock_lock.lock().await;
        let order = self.load_for_change(id, owner).await?;

        self.return_stock(&order.lines).await?;
        self.orders.delete_by_id(id).await?;
        counter!("orders_deleted_total").increment(1);
        Ok(())
    }

    /// 用户是否有订单
    pub async fn exists_by_user_id(&self, user_id: i64) -> Result<bool, OrderError> {
        Ok(self.orders.exists_by_user_id(user_id).await?)
    }

    /// 用户所有订单的ID
    pub async fn find_ids_by_user_id(&self, user_id: i64) -> Result<Vec<Uuid>, OrderError> {
        Ok(self.orders.find_ids_by_user_id(user_id).await?)
    }

    /// 校验订单行
    ///
    /// 同一商品出现在多行时按总数量校验库存
    async fn check_lines(&self, lines: &[OrderLine]) -> Result<(), OrderError> {
        if lines.is_empty() {
            return Err(OrderError::NotItems);
        }

        let mut requested: BTreeMap<i64, i32> = BTreeMap::new();
        for line in lines {
            let product = self.load_product(line.product_id).await?;
            let quantity = requested.entry(line.product_id).or_insert(0);
            *quantity += line.quantity;

            if *quantity > product.stock {
                return Err(OrderError::ProductNotStock(line.product_id));
            }
            if product.price != line.product_price {
                return Err(OrderError::ProductBadPrice(line.product_id));
            }
        }
        Ok(())
    }

    /// 扣减库存并计算订单合计
    async fn reserve_stock(&self, order: &mut Order) -> Result<(), OrderError> {
        for line in &order.lines {
            let mut product = self.load_product(line.product_id).await?;
            product.stock -= line.quantity;
            product.updated_at = Utc::now();
            self.store_product(&product).await?;
        }
        order.recalculate_totals();
        order.updated_at = Utc::now();
        Ok(())
    }

    /// 归还订单行占用的库存
    async fn return_stock(&self, lines: &[OrderLine]) -> Result<(), OrderError> {
        for line in lines {
            match self.products.find_by_id(line.product_id).await? {
                Some(mut product) => {
                    product.stock += line.quantity;
                    product.updated_at = Utc::now();
                    self.store_product(&product).await?;
                }
                None => warn!(
                    "Cannot return stock of missing product {}",
                    line.product_id
                ),
            }
        }
        Ok(())
    }

    async fn load_product(&self, id: i64) -> Result<Product, OrderError> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or(OrderError::ProductNotFound(id))
    }

    async fn store_product(&self, product: &Product) -> Result<(), OrderError> {
        self.products.save(product).await?;
        evict_product(&self.cache, product).await;
        Ok(())
    }
}
