// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::extract::ws::{Message, WebSocket};
use axum::{extract::WebSocketUpgrade, response::Response, Extension};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

use super::connection::ConnectionManager;
use super::messages::{is_ping, WsMessage};

/// 商品变更 WebSocket 升级处理器
///
/// 端点: GET /ws/v1/products
pub async fn products_ws_handler(
    ws: WebSocketUpgrade,
    Extension(manager): Extension<Arc<ConnectionManager>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, manager))
}

async fn handle_socket(socket: WebSocket, manager: Arc<ConnectionManager>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsMessage>();

    let conn_id = manager.add_connection(tx.clone());
    let _ = tx.send(WsMessage::Greeting);

    // Forward queued messages to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg.to_text() {
                Ok(text) => {
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!("Failed to serialize WebSocket message: {}", e),
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) if is_ping(text.as_str()) => {
                    let _ = tx.send(WsMessage::Pong);
                }
                Message::Close(_) => break,
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    manager.remove_connection(conn_id);
}
