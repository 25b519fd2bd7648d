//! Startup replay: loads today's persisted orders back into the live
//! queue before the server starts accepting traffic.

use std::sync::Arc;

use chrono::Local;

use crate::gateway::state::AppState;

/// Loads today's orders (ascending by `time_received`, per this crate's
/// persistence contract — see `DESIGN.md` OQ-4), replays each into the
/// queue engine stripped of any already-completed drinks, and broadcasts
/// once afterward so a client connecting right after startup sees full
/// state without waiting for the next mutation.
pub async fn replay(state: &Arc<AppState>) -> anyhow::Result<()> {
    let Some(persistence) = &state.persistence else {
        return Ok(());
    };

    let today = Local::now().date_naive();
    let orders = persistence.get_queue(today).await?;
    tracing::info!(count = orders.len(), "replaying today's orders from persistence");

    let mut engine = state.engine.lock().await;
    for order in orders {
        let mut live = order.clone();
        live.drinks.retain(|d| d.time_complete.is_none());
        engine.replay_order(order, live);
    }
    drop(engine);

    state.broadcast_snapshot().await;
    Ok(())
}
