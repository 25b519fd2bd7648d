//! brewqueue - entry point.
//!
//! Wires config loading, logging, persistence, startup replay, and the HTTP
//! + websocket server together.

use brewqueue::config::AppConfig;
use brewqueue::gateway::run_server;
use brewqueue::gateway::state::AppState;
use brewqueue::logging::init_logging;
use brewqueue::persistence::PersistenceAdapter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("BREWQUEUE_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());
    let config = AppConfig::load(&config_path)?;
    let _log_guard = init_logging(&config);

    tracing::info!(port = config.port, "starting brewqueue");

    let persistence = match PersistenceAdapter::connect(&config.database_url).await {
        Ok(adapter) => Some(adapter),
        Err(err) => {
            tracing::error!(%err, "failed to connect to persistence, starting with an empty queue");
            None
        }
    };

    let state = AppState::new(config, persistence);

    if let Err(err) = brewqueue::startup::replay(&state).await {
        tracing::error!(%err, "failed to replay persisted orders");
    }

    run_server(state).await
}
