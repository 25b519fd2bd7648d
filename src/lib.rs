//! brewqueue - Barista queue optimization engine
//!
//! Accepts customer orders for a barista workstation, batches drinks that
//! share milk type and texture so one jug of steamed milk can serve several
//! drinks at once, and serves as the authoritative live view for the
//! station's UI over HTTP and a websocket feed.
//!
//! # Modules
//!
//! - [`core_types`] - id/position type aliases
//! - [`domain`] - `Drink`, `Order`, `Batch`, `Item`
//! - [`queue`] - the optimization engine: lookup index, history, batching
//! - [`persistence`] - Postgres-backed order history
//! - [`websocket`] - broadcasts live snapshots to UI clients
//! - [`gateway`] - HTTP router, handlers, shared state
//! - [`config`] - menu/network/logging configuration
//! - [`logging`] - structured logging setup
//! - [`error`] - domain error types
//! - [`startup`] - replays persisted orders into the live queue on boot

pub mod config;
pub mod core_types;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod persistence;
pub mod queue;
pub mod startup;
pub mod websocket;

pub use domain::{Batch, Drink, Item, Order};
pub use queue::QueueEngine;
