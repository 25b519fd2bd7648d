//! Secondary index mapping `(milk, texture)` keys to the set of live queue
//! positions that currently hold a drink of that key.
//!
//! Every mutation of the live queue sequence goes through one of
//! [`LookupIndex::insert_at`], [`LookupIndex::remove_at`], or
//! [`LookupIndex::shift_from`] — no caller touches the underlying map
//! directly, which is what keeps position bookkeeping consistent across the
//! batching and merge algorithm in [`crate::queue::engine`].

use std::collections::{BTreeSet, HashMap};

use crate::core_types::Position;

#[derive(Debug, Default, Clone)]
pub struct LookupIndex {
    table: HashMap<String, BTreeSet<Position>>,
}

impl LookupIndex {
    /// Builds an empty index with one entry per `milk x texture` pair drawn
    /// from the configured menu, so every valid key is present (possibly
    /// empty) from the start.
    pub fn new(milks: &[String], textures: &[String]) -> Self {
        let mut table = HashMap::new();
        for milk in milks {
            for texture in textures {
                table.insert(format!("{milk}_{texture}"), BTreeSet::new());
            }
        }
        Self { table }
    }

    /// Records that `position` now holds an item indexed under `key`.
    pub fn insert_at(&mut self, key: &str, position: Position) {
        self.table.entry(key.to_string()).or_default().insert(position);
    }

    /// Removes `position` from every key's set. Call when the item at
    /// `position` is removed from the live sequence, before any positions
    /// are renumbered.
    pub fn remove_at(&mut self, position: Position) {
        for set in self.table.values_mut() {
            set.remove(&position);
        }
    }

    /// Increments every recorded position `>= from` by one, to account for a
    /// new item being inserted at index `from` in the live sequence.
    pub fn shift_from(&mut self, from: Position) {
        for set in self.table.values_mut() {
            let shifted: BTreeSet<Position> = set
                .iter()
                .map(|&p| if p >= from { p + 1 } else { p })
                .collect();
            *set = shifted;
        }
    }

    /// Decrements every recorded position `> from` by one, to account for the
    /// item that used to sit at `from` having been removed from the live
    /// sequence. `from` itself must already have been stripped via
    /// [`Self::remove_at`].
    pub fn decrement_after(&mut self, from: Position) {
        for set in self.table.values_mut() {
            let shifted: BTreeSet<Position> = set
                .iter()
                .map(|&p| if p > from { p - 1 } else { p })
                .collect();
            *set = shifted;
        }
    }

    /// Candidate positions for `key` within `[lo, hi)`, closest to `hi`
    /// first (descending), which is the proximity order the merge algorithm
    /// scans in. Positions 0 and 1 are never candidates: 0 is the item
    /// already at the head of the queue, and 1 is next up, both of which a
    /// barista may already be working from.
    pub fn candidates(&self, key: &str, lo: Position, hi: Position) -> Vec<Position> {
        match self.table.get(key) {
            None => Vec::new(),
            Some(set) => set
                .iter()
                .rev()
                .filter(|&&p| p > 1 && p >= lo && p < hi)
                .copied()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> LookupIndex {
        LookupIndex::new(&["Oat".to_string()], &["Dry".to_string()])
    }

    #[test]
    fn insert_and_remove_round_trip() {
        let mut idx = index();
        idx.insert_at("Oat_Dry", 3);
        assert_eq!(idx.candidates("Oat_Dry", 0, 10), vec![3]);
        idx.remove_at(3);
        assert!(idx.candidates("Oat_Dry", 0, 10).is_empty());
    }

    #[test]
    fn shift_from_increments_positions_at_or_after() {
        let mut idx = index();
        idx.insert_at("Oat_Dry", 2);
        idx.insert_at("Oat_Dry", 5);
        idx.shift_from(3);
        assert_eq!(idx.candidates("Oat_Dry", 0, 10), vec![6, 2]);
    }

    #[test]
    fn decrement_after_shifts_down() {
        let mut idx = index();
        idx.insert_at("Oat_Dry", 2);
        idx.insert_at("Oat_Dry", 6);
        idx.remove_at(4);
        idx.decrement_after(4);
        assert_eq!(idx.candidates("Oat_Dry", 0, 10), vec![5, 2]);
    }

    #[test]
    fn candidates_exclude_position_one_and_out_of_window() {
        let mut idx = index();
        idx.insert_at("Oat_Dry", 1);
        idx.insert_at("Oat_Dry", 4);
        idx.insert_at("Oat_Dry", 9);
        assert_eq!(idx.candidates("Oat_Dry", 2, 9), vec![4]);
    }

    #[test]
    fn candidates_exclude_position_one_even_with_full_lookback() {
        let mut idx = index();
        idx.insert_at("Oat_Dry", 1);
        idx.insert_at("Oat_Dry", 4);
        idx.insert_at("Oat_Dry", 9);
        assert_eq!(idx.candidates("Oat_Dry", 0, 9), vec![4]);
    }
}
