// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 商品变更的 WebSocket 推送通道
//!
//! 连接建立后先发送问候语，之后每次商品变更都会以 JSON 广播给所有客户端。

pub mod connection;
pub mod handler;
pub mod messages;

pub use connection::ConnectionManager;
pub use handler::products_ws_handler;
