//! Postgres persistence for the order queue.

pub mod repository;
pub mod schema;

pub use repository::PersistenceAdapter;
