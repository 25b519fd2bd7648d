//! HTTP + WebSocket router and server bootstrap: route wiring,
//! `TcpListener::bind` + `axum::serve`, a startup banner, and an
//! error-exit on bind failure.

pub mod handlers;
pub mod state;
pub mod types;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

use crate::websocket::ws_handler;
use state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let ingest_prefix = state.config.ingest_prefix();

    Router::new()
        .route("/", get(handlers::get_queue))
        .route("/history", get(handlers::get_history))
        .route(&format!("{ingest_prefix}/receive"), post(handlers::receive_order))
        .route(&format!("{ingest_prefix}/complete"), post(handlers::complete_drinks))
        .route("/ws/newOrder", get(ws_handler))
        .with_state(state)
}

pub async fn run_server(state: Arc<AppState>) -> anyhow::Result<()> {
    let port = state.config.port;
    let app = build_router(Arc::clone(&state));

    let listener = match TcpListener::bind(("0.0.0.0", port)).await {
        Ok(listener) => listener,
        Err(err) => {
            eprintln!("failed to bind port {port}: {err}");
            std::process::exit(1);
        }
    };

    println!("brewqueue listening on 0.0.0.0:{port}");
    println!("ingest prefix: {}", state.config.ingest_prefix());

    if let Err(err) = axum::serve(listener, app).await {
        eprintln!("server error: {err}");
        std::process::exit(1);
    }
    Ok(())
}
