//! Shared application state: the live queue engine behind a mutex, the
//! optional persistence adapter, the websocket broadcaster, and the
//! `AtomicU64`-backed id generators, all `Arc`-wrapped for the handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::domain::ids::{DrinkIdGen, OrderIdGen};
use crate::persistence::PersistenceAdapter;
use crate::queue::QueueEngine;
use crate::websocket::{Broadcaster, QueueSnapshot};

pub struct AppState {
    pub engine: Mutex<QueueEngine>,
    pub persistence: Option<PersistenceAdapter>,
    pub broadcaster: Arc<Broadcaster>,
    pub config: AppConfig,
    pub drink_id_gen: DrinkIdGen,
    pub order_id_gen: OrderIdGen,
}

impl AppState {
    pub fn new(config: AppConfig, persistence: Option<PersistenceAdapter>) -> Arc<Self> {
        let engine = QueueEngine::new(
            &config.milks,
            &config.textures,
            config.search_depth,
            config.max_batch_volume,
        );
        Arc::new(Self {
            engine: Mutex::new(engine),
            persistence,
            broadcaster: Arc::new(Broadcaster::new()),
            config,
            drink_id_gen: DrinkIdGen::new(),
            order_id_gen: OrderIdGen::new(),
        })
    }

    /// A consistent snapshot of the live queue for the `GET /` route and for
    /// the post-mutation websocket broadcast.
    pub async fn snapshot(&self) -> QueueSnapshot {
        let engine = self.engine.lock().await;
        QueueSnapshot {
            orders: engine.orders().to_vec(),
            total_orders: engine.total_orders(),
            total_drinks: engine.total_drinks(),
        }
    }

    /// Sends the current snapshot to every connected client. Called once
    /// after every mutation, and once after startup replay finishes.
    pub async fn broadcast_snapshot(&self) {
        let snapshot = self.snapshot().await;
        self.broadcaster.broadcast(&snapshot);
    }
}
