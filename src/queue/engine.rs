//! The queue optimization engine: the ordered live sequence, its lookup
//! index, the internal/cross-order batching algorithm, and the completion
//! workflow.
//!
//! Mutating methods are `&mut self` and are only ever called while a caller
//! holds the single `Mutex<QueueEngine>` in [`crate::gateway::state::AppState`].
//! Nothing here performs its own locking.

use std::collections::{HashMap, HashSet};

use chrono::NaiveTime;

use crate::core_types::{DrinkId, OrderId, Position};
use crate::domain::{Batch, Drink, Item, Order};
use crate::queue::history::OrderHistory;
use crate::queue::lookup::LookupIndex;

enum MergeAction {
    IntoBatch,
    IntoOrder(Vec<Drink>),
}

/// The outcome of a completion call: every drink id actually completed
/// (regardless of which form field named it), and the ids of any orders
/// that became fully complete as a result. Callers persist both.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Completion {
    pub drink_ids: Vec<DrinkId>,
    pub completed_order_ids: Vec<OrderId>,
}

#[derive(Debug)]
pub struct QueueEngine {
    orders: Vec<Item>,
    lookup: LookupIndex,
    order_positions: HashMap<OrderId, Position>,
    history: OrderHistory,
    total_orders: u64,
    total_drinks: u64,
    orders_complete: u64,
    drinks_complete: u64,
    search_depth: usize,
    max_batch_volume: f64,
}

impl QueueEngine {
    pub fn new(
        milks: &[String],
        textures: &[String],
        search_depth: usize,
        max_batch_volume: f64,
    ) -> Self {
        Self {
            orders: Vec::new(),
            lookup: LookupIndex::new(milks, textures),
            order_positions: HashMap::new(),
            history: OrderHistory::new(),
            total_orders: 0,
            total_drinks: 0,
            orders_complete: 0,
            drinks_complete: 0,
            search_depth,
            max_batch_volume,
        }
    }

    pub fn orders(&self) -> &[Item] {
        &self.orders
    }

    pub fn total_orders(&self) -> u64 {
        self.total_orders
    }

    pub fn total_drinks(&self) -> u64 {
        self.total_drinks
    }

    pub fn orders_complete(&self) -> u64 {
        self.orders_complete
    }

    pub fn drinks_complete(&self) -> u64 {
        self.drinks_complete
    }

    pub fn completed_items(&self) -> Vec<Order> {
        self.history.completed_items()
    }

    pub fn count_completed_orders(&self) -> u64 {
        self.orders_complete
    }

    /// Accepts a fully-formed order (identifiers already assigned by the
    /// caller, e.g. [`crate::domain::order::Order::from_request`]), runs the
    /// internal-batching and cross-order-merge algorithm, and leaves the
    /// queue in a consistent state.
    ///
    /// Returns the order's live-queue position at the time it was first
    /// appended (before any batching shifted it back); callers use this only
    /// for logging, the return value has no bearing on correctness.
    pub fn add_order(&mut self, order: Order) -> Position {
        self.history.record(&order);
        self.enqueue(order)
    }

    /// Replays a persisted order at startup: records the full order
    /// (including any already-completed drinks) into history so `/history`
    /// reflects it, counts its completed drinks into the running counters,
    /// and enqueues only `live` (the same order stripped of completed
    /// drinks) into the active queue. If `live` has no drinks left, nothing
    /// is enqueued — the order was already fully completed before restart.
    pub fn replay_order(&mut self, full: Order, mut live: Order) -> Position {
        let completed_count = full
            .drinks
            .iter()
            .filter(|d| d.time_complete.is_some())
            .count() as u64;
        self.history.record(&full);
        self.drinks_complete += completed_count;
        if full.is_fully_complete() {
            self.orders_complete += 1;
        }

        if live.drinks.is_empty() {
            self.recompute_counters();
            return self.orders.len();
        }
        live.order_id = full.order_id;
        self.enqueue(live)
    }

    fn enqueue(&mut self, order: Order) -> Position {
        let had_multiple_drinks = order.drinks.len() > 1;
        let order_id = order.order_id;

        let mut pos = self.orders.len();
        let original_pos = pos;
        self.orders.push(Item::Order(order.clone()));
        self.order_positions.insert(order_id, pos);

        let mut working_drinks = order.drinks;

        if had_multiple_drinks {
            let mut group_order: Vec<String> = Vec::new();
            let mut groups: HashMap<String, Vec<Drink>> = HashMap::new();
            let mut leftovers: Vec<Drink> = Vec::new();
            for drink in working_drinks.drain(..) {
                match drink.lookup_key() {
                    None => leftovers.push(drink),
                    Some(key) => {
                        if !groups.contains_key(&key) {
                            group_order.push(key.clone());
                        }
                        groups.entry(key).or_default().push(drink);
                    }
                }
            }
            for key in group_order {
                let drinks = groups.remove(&key).unwrap_or_default();
                if drinks.len() >= 2 {
                    let mut iter = drinks.into_iter();
                    let mut batch = Batch::from_first_drink(iter.next().expect("non-empty group"));
                    for drink in iter {
                        batch.add_drink(drink);
                    }
                    self.insert_item_at(pos, Item::Batch(batch));
                    pos += 1;
                } else {
                    leftovers.extend(drinks);
                }
            }
            working_drinks = leftovers;
        }

        if let Item::Order(o) = &mut self.orders[pos] {
            o.drinks = working_drinks.clone();
        }
        self.reindex_position(pos);

        let search_depth_for_order = if !had_multiple_drinks { pos } else { self.search_depth };
        let mut remaining: Vec<Drink> = Vec::new();
        for drink in working_drinks {
            if drink.has_no_milk() {
                remaining.push(drink);
                continue;
            }
            let key = drink.lookup_key().expect("milk drink always has a key");
            let lo = pos.saturating_sub(search_depth_for_order);
            if !self.try_merge_drink(&key, lo, &mut pos, drink.clone()) {
                remaining.push(drink);
            }
        }
        if let Item::Order(o) = &mut self.orders[pos] {
            o.drinks = remaining;
        }
        self.reindex_position(pos);

        self.cleanup();
        let _ = original_pos;
        pos
    }

    /// Tries to fold `drink` into an existing candidate within `[lo, hi)`,
    /// closest first. Returns true and mutates the queue on success; `hi`
    /// (the order's own current position) is bumped by one if a new Batch
    /// had to be inserted ahead of it.
    fn try_merge_drink(&mut self, key: &str, lo: Position, hi: &mut Position, drink: Drink) -> bool {
        let candidates = self.lookup.candidates(key, lo, *hi);
        for cand_pos in candidates {
            let action = match &self.orders[cand_pos] {
                Item::Batch(batch) => {
                    if batch.can_add_drink(&drink, self.max_batch_volume) {
                        Some(MergeAction::IntoBatch)
                    } else {
                        None
                    }
                }
                Item::Order(cand_order) => {
                    let siblings: Vec<Drink> = cand_order
                        .drinks
                        .iter()
                        .filter(|d| d.lookup_key().as_deref() == Some(key))
                        .cloned()
                        .collect();
                    if siblings.is_empty() {
                        None
                    } else {
                        Some(MergeAction::IntoOrder(siblings))
                    }
                }
            };

            match action {
                None => continue,
                Some(MergeAction::IntoBatch) => {
                    if let Item::Batch(batch) = &mut self.orders[cand_pos] {
                        batch.add_drink(drink);
                    }
                    self.reindex_position(cand_pos);
                    return true;
                }
                Some(MergeAction::IntoOrder(siblings)) => {
                    if let Item::Order(cand_order) = &mut self.orders[cand_pos] {
                        cand_order.drinks.retain(|d| d.lookup_key().as_deref() != Some(key));
                    }
                    self.reindex_position(cand_pos);
                    let mut batch = Batch::from_first_drink(siblings[0].clone());
                    for sibling in &siblings[1..] {
                        batch.add_drink(sibling.clone());
                    }
                    batch.add_drink(drink);
                    self.insert_item_at(cand_pos, Item::Batch(batch));
                    *hi += 1;
                    return true;
                }
            }
        }
        false
    }

    /// Completes every drink in `ids` wherever it currently lives in the
    /// live queue. Unknown or already-completed identifiers are ignored,
    /// making repeated calls with overlapping ids safe. Returns every drink
    /// id actually completed plus the ids of any orders that became fully
    /// complete, for the caller to persist.
    pub fn complete_drinks(&mut self, ids: &[DrinkId], now: NaiveTime) -> Completion {
        if ids.is_empty() {
            return Completion::default();
        }
        let id_set: HashSet<DrinkId> = ids.iter().copied().collect();
        let mut completed_by_order: HashMap<OrderId, Vec<DrinkId>> = HashMap::new();

        for item in self.orders.iter_mut() {
            let drinks = std::mem::take(item.drinks_mut());
            let mut keep = Vec::with_capacity(drinks.len());
            for drink in drinks {
                if id_set.contains(&drink.identifier) {
                    completed_by_order
                        .entry(drink.order_id)
                        .or_default()
                        .push(drink.identifier);
                } else {
                    keep.push(drink);
                }
            }
            *item.drinks_mut() = keep;
        }

        for pos in 0..self.orders.len() {
            self.reindex_position(pos);
        }
        self.cleanup();

        let mut completion = Completion::default();
        for (order_id, completed_ids) in completed_by_order {
            self.history.mark_complete(order_id, &completed_ids, now);
            self.drinks_complete += completed_ids.len() as u64;
            if self.history.is_order_complete(order_id) {
                self.orders_complete += 1;
                completion.completed_order_ids.push(order_id);
            }
            completion.drink_ids.extend(completed_ids);
        }
        completion
    }

    /// Completes every drink currently held by the item at `index`. Returns
    /// every drink id actually completed plus the ids of any orders that
    /// became fully complete as a result.
    pub fn complete_item(&mut self, index: usize, now: NaiveTime) -> Completion {
        let ids: Vec<DrinkId> = match self.orders.get(index) {
            Some(item) => item.drinks().iter().map(|d| d.identifier).collect(),
            None => return Completion::default(),
        };
        self.complete_drinks(&ids, now)
    }

    fn insert_item_at(&mut self, pos: Position, item: Item) {
        self.orders.insert(pos, item);
        self.lookup.shift_from(pos);
        for position in self.order_positions.values_mut() {
            if *position >= pos {
                *position += 1;
            }
        }
        if let Item::Order(order) = &self.orders[pos] {
            self.order_positions.insert(order.order_id, pos);
        }
        self.reindex_position(pos);
    }

    fn remove_item_at(&mut self, pos: Position) {
        self.lookup.remove_at(pos);
        if let Item::Order(order) = &self.orders[pos] {
            self.order_positions.remove(&order.order_id);
        }
        self.orders.remove(pos);
        self.lookup.decrement_after(pos);
        for position in self.order_positions.values_mut() {
            if *position > pos {
                *position -= 1;
            }
        }
    }

    /// Re-derives the lookup entries for whatever currently sits at `pos`,
    /// without touching any other position. Safe to call whenever an item's
    /// drink composition changes but its position doesn't.
    fn reindex_position(&mut self, pos: Position) {
        self.lookup.remove_at(pos);
        let keys = self.orders[pos].lookup_keys();
        for key in keys {
            self.lookup.insert_at(&key, pos);
        }
    }

    /// Drops empty items and recomputes the distinct-order/drink counters
    /// from the live queue contents.
    fn cleanup(&mut self) {
        let mut i = 0;
        while i < self.orders.len() {
            if self.orders[i].is_empty() {
                self.remove_item_at(i);
            } else {
                i += 1;
            }
        }
        self.recompute_counters();
    }

    fn recompute_counters(&mut self) {
        let mut ids: HashSet<OrderId> = HashSet::new();
        let mut drink_count = 0u64;
        for item in &self.orders {
            for drink in item.drinks() {
                ids.insert(drink.order_id);
                drink_count += 1;
            }
        }
        self.total_orders = ids.len() as u64;
        self.total_drinks = drink_count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn engine() -> QueueEngine {
        QueueEngine::new(
            &["Oat".to_string(), "Soy".to_string(), "Whole".to_string()],
            &["Dry".to_string(), "Wet".to_string()],
            2,
            5.0,
        )
    }

    fn drink(id: DrinkId, order_id: OrderId, customer: &str, milk: Option<&str>, texture: Option<&str>, volume: f64) -> Drink {
        Drink {
            identifier: id,
            order_id,
            customer: customer.to_string(),
            drink: "Latte".to_string(),
            milk: milk.map(|m| m.to_string()),
            milk_volume: volume,
            shots: 1,
            temperature: None,
            texture: texture.map(|t| t.to_string()),
            options: vec![],
            time_received: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            time_complete: None,
        }
    }

    fn order(id: OrderId, customer: &str, drinks: Vec<Drink>) -> Order {
        Order {
            order_id: id,
            customer: customer.to_string(),
            date_received: NaiveDate::from_ymd_opt(2026, 7, 27).unwrap(),
            time_received: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            time_complete: None,
            drinks,
        }
    }

    #[test]
    fn single_no_milk_drink_is_never_batched() {
        let mut eng = engine();
        eng.add_order(order(1, "Jeff", vec![drink(1, 1, "Jeff", None, None, 0.0)]));
        assert_eq!(eng.orders().len(), 1);
        match &eng.orders()[0] {
            Item::Order(o) => assert_eq!(o.drinks.len(), 1),
            Item::Batch(_) => panic!("no-milk drink must not be batched"),
        }
    }

    #[test]
    fn internal_batching_groups_same_key_drinks() {
        let mut eng = engine();
        let hannah = order(
            1,
            "Hannah",
            vec![
                drink(1, 1, "Hannah", Some("Oat"), Some("Dry"), 1.5),
                drink(2, 1, "Hannah", Some("Oat"), Some("Dry"), 1.5),
                drink(3, 1, "Hannah", Some("Soy"), Some("Wet"), 1.0),
            ],
        );
        eng.add_order(hannah);
        let has_batch = eng.orders().iter().any(|item| matches!(item, Item::Batch(b) if b.drinks.len() == 2));
        assert!(has_batch, "expected a 2-drink batch from Hannah's matching drinks");
    }

    #[test]
    fn cross_order_merge_combines_single_drink_orders() {
        let mut eng = engine();
        eng.add_order(order(1, "Adam", vec![drink(1, 1, "Adam", Some("Oat"), Some("Dry"), 2.0)]));
        eng.add_order(order(2, "Kayleigh", vec![drink(2, 2, "Kayleigh", Some("Oat"), Some("Dry"), 2.0)]));
        let batch_count = eng
            .orders()
            .iter()
            .filter(|item| matches!(item, Item::Batch(_)))
            .count();
        assert_eq!(batch_count, 1, "Adam and Kayleigh's matching drinks should merge into one batch");
    }

    #[test]
    fn capacity_rejects_overflowing_merge() {
        let mut eng = engine();
        eng.add_order(order(1, "Adam", vec![drink(1, 1, "Adam", Some("Oat"), Some("Dry"), 4.0)]));
        eng.add_order(order(2, "Kayleigh", vec![drink(2, 2, "Kayleigh", Some("Oat"), Some("Dry"), 4.0)]));
        let batch_count = eng
            .orders()
            .iter()
            .filter(|item| matches!(item, Item::Batch(_)))
            .count();
        assert_eq!(batch_count, 0, "4.0 + 4.0 exceeds the 5.0 cap, no merge should occur");
    }

    #[test]
    fn complete_drinks_is_idempotent_and_updates_counters() {
        let mut eng = engine();
        eng.add_order(order(1, "Jeff", vec![drink(1, 1, "Jeff", None, None, 0.0)]));
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        let first = eng.complete_drinks(&[1], t);
        let second = eng.complete_drinks(&[1], t);
        assert_eq!(first.drink_ids, vec![1]);
        assert_eq!(first.completed_order_ids, vec![1]);
        assert!(second.completed_order_ids.is_empty(), "already-completed order must not repeat");
        assert_eq!(eng.drinks_complete(), 1);
        assert_eq!(eng.orders_complete(), 1);
        assert_eq!(eng.total_drinks(), 0);
        assert_eq!(eng.total_orders(), 0);
    }

    #[test]
    fn complete_item_reports_the_drink_ids_it_actually_completed() {
        let mut eng = engine();
        eng.add_order(order(
            1,
            "Adam",
            vec![
                drink(1, 1, "Adam", Some("Oat"), Some("Dry"), 1.0),
                drink(2, 1, "Adam", Some("Oat"), Some("Dry"), 1.0),
            ],
        ));
        let t = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        // Caller selects by item index, unaware of the underlying drink ids
        // the batch actually holds.
        let completion = eng.complete_item(0, t);
        let mut ids = completion.drink_ids.clone();
        ids.sort();
        assert_eq!(ids, vec![1, 2], "complete_item must report the ids it resolved internally");
        assert_eq!(completion.completed_order_ids, vec![1]);
    }

    #[test]
    fn replay_round_trip_preserves_counts() {
        let mut eng = engine();
        eng.add_order(order(
            1,
            "Adam",
            vec![
                drink(1, 1, "Adam", Some("Oat"), Some("Dry"), 1.0),
                drink(2, 1, "Adam", None, None, 0.0),
            ],
        ));
        assert_eq!(eng.total_orders(), 1);
        assert_eq!(eng.total_drinks(), 2);
    }
}
