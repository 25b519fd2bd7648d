use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::drink::Drink;
use crate::core_types::OrderId;
use crate::domain::ids::OrderIdGen;

/// A customer order: a named customer, a receipt time, and the drinks they
/// asked for.
///
/// Construction back-fills `customer`, `order_id`, and `time_received` onto
/// any drink that omitted them. This is plain constructor logic, not a
/// two-way link between `Order` and `Drink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub order_id: OrderId,
    pub customer: String,
    #[serde(default = "default_date")]
    pub date_received: NaiveDate,
    #[serde(default = "default_time")]
    pub time_received: NaiveTime,
    pub time_complete: Option<NaiveTime>,
    pub drinks: Vec<Drink>,
}

fn default_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).expect("valid literal date")
}

fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("valid literal time")
}

impl Order {
    /// Builds an order from a freshly-deserialized request body, assigning a
    /// fresh `order_id` and back-filling every drink's owner fields.
    pub fn from_request(mut order: Order, id_gen: &OrderIdGen, id_source: impl Fn() -> u64) -> Order {
        order.order_id = id_gen.next();
        order.backfill_drinks(id_source);
        order
    }

    /// Back-fills `customer`/`order_id`/`time_received` onto drinks that
    /// didn't set them, and assigns a fresh drink identifier to any drink
    /// whose identifier is still the zero default.
    pub fn backfill_drinks(&mut self, id_source: impl Fn() -> u64) {
        for drink in &mut self.drinks {
            if drink.identifier == 0 {
                drink.identifier = id_source();
            }
            if drink.customer.is_empty() {
                drink.customer = self.customer.clone();
            }
            if drink.order_id == 0 {
                drink.order_id = self.order_id;
            }
            if drink.time_received == default_time() {
                drink.time_received = self.time_received;
            }
        }
    }

    /// True once every drink in this order has a completion time.
    pub fn is_fully_complete(&self) -> bool {
        !self.drinks.is_empty() && self.drinks.iter().all(|d| d.time_complete.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::drink::Drink;

    fn blank_drink(name: &str) -> Drink {
        Drink {
            identifier: 0,
            order_id: 0,
            customer: String::new(),
            drink: name.to_string(),
            milk: Some("Oat".to_string()),
            milk_volume: 1.0,
            shots: 1,
            temperature: None,
            texture: Some("Dry".to_string()),
            options: vec![],
            time_received: default_time(),
            time_complete: None,
        }
    }

    #[test]
    fn backfill_propagates_owner_fields() {
        let gen = OrderIdGen::new();
        let mut next_drink_id = 0u64;
        let order = Order {
            order_id: 0,
            customer: "Adam".to_string(),
            date_received: default_date(),
            time_received: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            time_complete: None,
            drinks: vec![blank_drink("Latte"), blank_drink("Cortado")],
        };
        let order = Order::from_request(order, &gen, || {
            next_drink_id += 1;
            next_drink_id
        });
        assert_ne!(order.order_id, 0);
        for drink in &order.drinks {
            assert_eq!(drink.customer, "Adam");
            assert_eq!(drink.order_id, order.order_id);
            assert_eq!(drink.time_received, order.time_received);
            assert_ne!(drink.identifier, 0);
        }
    }
}
