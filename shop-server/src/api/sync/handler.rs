//! Catalog Sync WebSocket Handler

use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

/// GET /api/sync - upgrade to the change feed
pub async fn ws(State(state): State<ServerState>, upgrade: WebSocketUpgrade) -> Response {
    upgrade.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: ServerState) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.subscribe_sync();
    tracing::debug!("sync subscriber connected");

    loop {
        tokio::select! {
            msg = rx.recv() => match msg {
                Ok(sync) => {
                    let Ok(text) = serde_json::to_string(&sync) else {
                        continue;
                    };
                    if sender.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    // 慢消费者：丢帧继续，客户端按版本号自行对齐
                    tracing::debug!(skipped, "sync subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                // 忽略客户端帧，连接关闭或出错则退出
                Some(Ok(_)) => {}
                _ => break,
            },
        }
    }

    tracing::debug!("sync subscriber disconnected");
}
