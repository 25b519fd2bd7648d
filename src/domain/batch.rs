use serde::{Deserialize, Serialize};

use super::drink::Drink;

/// A synthetic grouping of drinks that share a milk and texture, created by
/// the queue engine so a barista can steam one jug of milk for several
/// drinks at once. Has no `order_id`/`customer` of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub drinks: Vec<Drink>,
    pub milk: Option<String>,
    pub texture: Option<String>,
    pub volume: f64,
}

impl Batch {
    /// Builds a batch from its first drink, which fixes the batch's milk and
    /// texture for every subsequent drink.
    pub fn from_first_drink(drink: Drink) -> Self {
        let milk = drink.milk.clone();
        let texture = drink.texture.clone();
        let volume = drink.milk_volume;
        Batch {
            drinks: vec![drink],
            milk,
            texture,
            volume,
        }
    }

    /// Whether `drink` could be folded into this batch without exceeding
    /// `max_volume`. Strict `<=`: a batch may sit exactly at the cap.
    pub fn can_add_drink(&self, drink: &Drink, max_volume: f64) -> bool {
        !drink.has_no_milk()
            && self.milk == drink.milk
            && self.texture == drink.texture
            && self.volume + drink.milk_volume <= max_volume
    }

    /// Folds `drink` into this batch. Callers must have already checked
    /// [`Self::can_add_drink`].
    pub fn add_drink(&mut self, drink: Drink) {
        self.volume += drink.milk_volume;
        self.drinks.push(drink);
    }

    pub fn lookup_key(&self) -> Option<String> {
        let milk = self.milk.as_deref().unwrap_or("");
        let texture = self.texture.as_deref().unwrap_or("");
        Some(format!("{milk}_{texture}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drink::NO_MILK;
    use chrono::NaiveTime;

    fn drink(milk: &str, texture: &str, volume: f64) -> Drink {
        Drink {
            identifier: 1,
            order_id: 1,
            customer: "Adam".to_string(),
            drink: "Latte".to_string(),
            milk: Some(milk.to_string()),
            milk_volume: volume,
            shots: 1,
            temperature: None,
            texture: Some(texture.to_string()),
            options: vec![],
            time_received: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            time_complete: None,
        }
    }

    #[test]
    fn accepts_exactly_at_capacity() {
        let batch = Batch::from_first_drink(drink("Oat", "Dry", 3.0));
        assert!(batch.can_add_drink(&drink("Oat", "Dry", 2.0), 5.0));
    }

    #[test]
    fn rejects_over_capacity() {
        let batch = Batch::from_first_drink(drink("Oat", "Dry", 3.0));
        assert!(!batch.can_add_drink(&drink("Oat", "Dry", 2.01), 5.0));
    }

    #[test]
    fn rejects_mismatched_milk_or_texture() {
        let batch = Batch::from_first_drink(drink("Oat", "Dry", 1.0));
        assert!(!batch.can_add_drink(&drink("Soy", "Dry", 1.0), 5.0));
        assert!(!batch.can_add_drink(&drink("Oat", "Wet", 1.0), 5.0));
    }

    #[test]
    fn never_accepts_no_milk() {
        let batch = Batch::from_first_drink(drink("Oat", "Dry", 1.0));
        let mut no_milk = drink("Oat", "Dry", 1.0);
        no_milk.milk = Some(NO_MILK.to_string());
        assert!(!batch.can_add_drink(&no_milk, 5.0));
    }
}
