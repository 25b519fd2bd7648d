//! The `/ws/newOrder` upgrade handler.
//!
//! Splits the socket into a spawned send task and a spawned recv task. This
//! endpoint is server-push-only — the client never sends commands — so the
//! recv task exists only to detect disconnects.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::gateway::state::AppState;

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let conn_id = state.broadcaster.add_connection(tx.clone());

    let snapshot = state.snapshot().await;
    if let Ok(payload) = serde_json::to_string(&snapshot) {
        let _ = tx.send(Message::Text(payload.into()));
    }

    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if ws_sender.send(message).await.is_err() {
                break;
            }
        }
    });

    let recv_task = tokio::spawn(async move {
        while let Some(Ok(_)) = ws_receiver.next().await {
            // Inbound frames are ignored; this loop exists only to notice
            // when the client disconnects.
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    state.broadcaster.remove_connection(conn_id);
}
