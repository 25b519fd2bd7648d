//! The queue optimization engine and its supporting index/history types.

pub mod engine;
pub mod history;
pub mod lookup;

pub use engine::{Completion, QueueEngine};
pub use history::OrderHistory;
pub use lookup::LookupIndex;
