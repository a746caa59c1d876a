// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::NotificationType;
use crate::domain::models::product::Product;

/// 商品变更通知接口
///
/// 推送是尽力而为的，实现方不应阻塞或向调用方返回错误
pub trait ProductNotifier: Send + Sync {
    /// 推送一条商品变更通知
    fn notify(&self, notification_type: NotificationType, product: &Product);
}

/// 丢弃所有通知的实现
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ProductNotifier for NoopNotifier {
    fn notify(&self, _notification_type: NotificationType, _product: &Product) {}
}
