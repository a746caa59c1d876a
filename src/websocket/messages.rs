// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::dto::product_dto::ProductResponse;
use crate::domain::models::notification::Notification;

/// 连接建立时发送的问候语
pub const GREETING: &str = "Updates Web socket: Products - Storefront API";

/// 商品通知的实体名称
pub const PRODUCTS_ENTITY: &str = "PRODUCTS";

/// 推送给客户端的消息
#[derive(Debug, Clone, PartialEq)]
pub enum WsMessage {
    /// 问候语
    Greeting,
    /// 对客户端 ping 的应答
    Pong,
    /// 商品变更通知
    Product(Notification<ProductResponse>),
}

impl WsMessage {
    /// 转换为要发送的文本帧内容
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        match self {
            WsMessage::Greeting => Ok(GREETING.to_string()),
            WsMessage::Pong => Ok("pong".to_string()),
            WsMessage::Product(notification) => serde_json::to_string(notification),
        }
    }
}

/// 客户端文本是否为 ping
pub fn is_ping(text: &str) -> bool {
    text.trim().eq_ignore_ascii_case("ping")
}
