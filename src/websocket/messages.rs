use serde::Serialize;

use crate::domain::Item;

/// The frame pushed to every connected UI client after a mutation, and once
/// after startup replay finishes so late-joining clients see full state
/// immediately.
#[derive(Debug, Clone, Serialize)]
pub struct QueueSnapshot {
    pub orders: Vec<Item>,
    #[serde(rename = "totalOrders")]
    pub total_orders: u64,
    #[serde(rename = "totalDrinks")]
    pub total_drinks: u64,
}
