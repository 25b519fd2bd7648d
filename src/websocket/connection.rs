//! Broadcasts queue snapshots to every connected barista-station UI client.
//!
//! A flat connection list rather than per-user routing: every client is an
//! equally privileged viewer of one shared board, so a mutation broadcasts
//! to all of them at once.

use std::sync::atomic::{AtomicU64, Ordering};

use axum::extract::ws::Message;
use dashmap::DashMap;
use tokio::sync::mpsc;

use crate::websocket::messages::QueueSnapshot;

pub type WsSender = mpsc::UnboundedSender<Message>;

#[derive(Debug, Default)]
pub struct Broadcaster {
    connections: DashMap<u64, WsSender>,
    next_id: AtomicU64,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_connection(&self, sender: WsSender) -> u64 {
        let conn_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.connections.insert(conn_id, sender);
        tracing::info!(conn_id, total_connections = self.connections.len(), "websocket client connected");
        conn_id
    }

    pub fn remove_connection(&self, conn_id: u64) {
        self.connections.remove(&conn_id);
        tracing::info!(conn_id, total_connections = self.connections.len(), "websocket client disconnected");
    }

    /// Sends `snapshot` to every connected client, dropping (and
    /// unregistering) any client whose channel is closed — kind (e) error
    /// handling: logged and the dead client is removed, nothing else fails.
    pub fn broadcast(&self, snapshot: &QueueSnapshot) {
        let payload = match serde_json::to_string(snapshot) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(%err, "failed to serialize queue snapshot");
                return;
            }
        };
        let message = Message::Text(payload.into());
        let mut dead = Vec::new();
        for entry in self.connections.iter() {
            if entry.value().send(message.clone()).is_err() {
                dead.push(*entry.key());
            }
        }
        for conn_id in dead {
            tracing::warn!(conn_id, "dropping websocket client with closed channel");
            self.connections.remove(&conn_id);
        }
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_connection_updates_count() {
        let broadcaster = Broadcaster::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = broadcaster.add_connection(tx);
        assert_eq!(broadcaster.connection_count(), 1);
        broadcaster.remove_connection(id);
        assert_eq!(broadcaster.connection_count(), 0);
    }

    #[test]
    fn broadcast_drops_closed_connections() {
        let broadcaster = Broadcaster::new();
        let (tx, rx) = mpsc::unbounded_channel();
        broadcaster.add_connection(tx);
        drop(rx);
        broadcaster.broadcast(&QueueSnapshot {
            orders: vec![],
            total_orders: 0,
            total_drinks: 0,
        });
        assert_eq!(broadcaster.connection_count(), 0);
    }
}
