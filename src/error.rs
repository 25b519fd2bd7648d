//! Domain error types, one enum per layer, following the same
//! `thiserror`-derived shape throughout the crate.

use thiserror::Error;

/// Kind (a) errors: a `POST /receive` body failed validation. No mutation
/// happens; the caller gets back a client error.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("order has no drinks")]
    EmptyOrder,
    #[error("customer name is required")]
    MissingCustomer,
    #[error("drink '{0}' has no name")]
    MissingDrinkName(usize),
    #[error("drink milk_volume must be >= 0, got {0}")]
    NegativeMilkVolume(f64),
    #[error("item index {0} is out of range")]
    InvalidItemIndex(usize),
}

/// Kind (b) errors: persistence failed. The in-memory queue is left
/// unchanged; the transaction that produced this error has already been
/// rolled back by the time it's constructed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
