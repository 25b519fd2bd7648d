use serde::{Deserialize, Serialize};

use super::{batch::Batch, drink::Drink, order::Order};

/// An element of the live queue sequence: either a customer's order or a
/// synthetic batch of drinks sharing milk and texture.
///
/// A single match expression distinguishes the two cases everywhere in this
/// crate; nothing downstream performs a runtime type test beyond it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Order(Order),
    Batch(Batch),
}

impl Item {
    pub fn drinks(&self) -> &[Drink] {
        match self {
            Item::Order(order) => &order.drinks,
            Item::Batch(batch) => &batch.drinks,
        }
    }

    pub fn drinks_mut(&mut self) -> &mut Vec<Drink> {
        match self {
            Item::Order(order) => &mut order.drinks,
            Item::Batch(batch) => &mut batch.drinks,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.drinks().is_empty()
    }

    pub fn order_id(&self) -> Option<u64> {
        match self {
            Item::Order(order) => Some(order.order_id),
            Item::Batch(_) => None,
        }
    }

    /// Every distinct `(milk, texture)` key this item should be indexed
    /// under. A batch has exactly one (its own); an order has one per
    /// distinct key among its still-unbatched drinks (an order can carry
    /// several single drinks of different milk/texture after internal
    /// batching has pulled out the same-key groups of two or more).
    pub fn lookup_keys(&self) -> Vec<String> {
        match self {
            Item::Order(order) => {
                let mut keys: Vec<String> = order
                    .drinks
                    .iter()
                    .filter_map(|d| d.lookup_key())
                    .collect();
                keys.sort();
                keys.dedup();
                keys
            }
            Item::Batch(batch) => batch.lookup_key().into_iter().collect(),
        }
    }
}
