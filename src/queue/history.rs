//! Most-recent-first log of every order accepted by the queue, independent
//! of whether it's still live or has since been completed and removed from
//! the active sequence.

use std::collections::{HashMap, HashSet, VecDeque};

use chrono::NaiveTime;

use crate::core_types::{DrinkId, OrderId, Position};
use crate::domain::Order;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub drink_ids: HashSet<DrinkId>,
    pub index: Position,
}

#[derive(Debug, Default)]
pub struct OrderHistory {
    /// Front = most recently recorded order.
    entries: VecDeque<Order>,
    index: HashMap<OrderId, HistoryEntry>,
}

impl OrderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a deep copy of `order` at the front of the log, and shifts
    /// every already-recorded index back by one.
    pub fn record(&mut self, order: &Order) {
        for entry in self.index.values_mut() {
            entry.index += 1;
        }
        let drink_ids = order.drinks.iter().map(|d| d.identifier).collect();
        self.index.insert(
            order.order_id,
            HistoryEntry {
                drink_ids,
                index: 0,
            },
        );
        self.entries.push_front(order.clone());
    }

    /// Stamps `time` onto every drink in `order_id`'s history entry whose
    /// identifier is in `drink_ids`. Idempotent: drinks already marked
    /// complete, or identifiers that don't belong to this order, are
    /// silently ignored.
    pub fn mark_complete(&mut self, order_id: OrderId, drink_ids: &[DrinkId], time: NaiveTime) {
        let Some(entry) = self.index.get(&order_id) else {
            return;
        };
        let Some(order) = self.entries.get_mut(entry.index) else {
            return;
        };
        for drink in &mut order.drinks {
            if drink_ids.contains(&drink.identifier) && drink.time_complete.is_none() {
                drink.time_complete = Some(time);
            }
        }
        if order.is_fully_complete() {
            order.time_complete = Some(time);
        }
    }

    /// Shallow copies of every history entry that has at least one
    /// completed drink, each trimmed down to only its completed drinks.
    /// Orders with no completed drinks yet are omitted entirely.
    pub fn completed_items(&self) -> Vec<Order> {
        self.entries
            .iter()
            .filter_map(|order| {
                let completed: Vec<_> = order
                    .drinks
                    .iter()
                    .filter(|d| d.time_complete.is_some())
                    .cloned()
                    .collect();
                if completed.is_empty() {
                    None
                } else {
                    let mut copy = order.clone();
                    copy.drinks = completed;
                    Some(copy)
                }
            })
            .collect()
    }

    pub fn index_for(&self, order_id: OrderId) -> Option<&HistoryEntry> {
        self.index.get(&order_id)
    }

    /// Whether `order_id`'s history entry has been stamped fully complete.
    pub fn is_order_complete(&self, order_id: OrderId) -> bool {
        self.index
            .get(&order_id)
            .and_then(|entry| self.entries.get(entry.index))
            .is_some_and(|order| order.time_complete.is_some())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Drink;
    use chrono::NaiveDate;

    fn order(id: OrderId, drink_ids: &[DrinkId]) -> Order {
        Order {
            order_id: id,
            customer: "Adam".to_string(),
            date_received: NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(),
            time_received: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            time_complete: None,
            drinks: drink_ids
                .iter()
                .map(|&id| Drink {
                    identifier: id,
                    order_id: order_id_for(id),
                    customer: "Adam".to_string(),
                    drink: "Latte".to_string(),
                    milk: Some("Oat".to_string()),
                    milk_volume: 1.0,
                    shots: 1,
                    temperature: None,
                    texture: Some("Dry".to_string()),
                    options: vec![],
                    time_received: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                    time_complete: None,
                })
                .collect(),
        }
    }

    fn order_id_for(_drink_id: DrinkId) -> OrderId {
        1
    }

    #[test]
    fn record_shifts_existing_indices() {
        let mut history = OrderHistory::new();
        history.record(&order(1, &[1]));
        history.record(&order(2, &[2]));
        assert_eq!(history.index_for(1).unwrap().index, 1);
        assert_eq!(history.index_for(2).unwrap().index, 0);
    }

    #[test]
    fn mark_complete_is_idempotent() {
        let mut history = OrderHistory::new();
        history.record(&order(1, &[1, 2]));
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        history.mark_complete(1, &[1], t);
        history.mark_complete(1, &[1], t);
        history.mark_complete(1, &[99], t);
        let completed = history.completed_items();
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].drinks.len(), 1);
    }
}
