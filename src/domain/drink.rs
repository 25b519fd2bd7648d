use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::core_types::{DrinkId, OrderId};

/// Sentinel milk value meaning "brewed without milk". Never indexed or
/// batched by milk/texture — see [`crate::queue::lookup::LookupIndex`].
pub const NO_MILK: &str = "No Milk";

/// A single beverage within an [`crate::domain::Order`] or
/// [`crate::domain::Batch`].
///
/// `identifier` is assigned once by [`crate::domain::ids::DrinkIdGen`] and
/// never changes; equality compares every field, including `identifier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drink {
    #[serde(default)]
    pub identifier: DrinkId,
    #[serde(default)]
    pub order_id: OrderId,
    #[serde(default)]
    pub customer: String,
    pub drink: String,
    pub milk: Option<String>,
    #[serde(default)]
    pub milk_volume: f64,
    #[serde(default)]
    pub shots: u32,
    pub temperature: Option<String>,
    pub texture: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default = "default_time")]
    pub time_received: NaiveTime,
    pub time_complete: Option<NaiveTime>,
}

fn default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(0, 0, 0).expect("valid literal time")
}

impl Drink {
    /// True when this drink has no milk and therefore can never be indexed
    /// or merged into a batch alongside other drinks.
    pub fn has_no_milk(&self) -> bool {
        match &self.milk {
            None => true,
            Some(m) => m == NO_MILK,
        }
    }

    /// The `(milk, texture)` key used by the lookup index, or `None` for a
    /// no-milk drink.
    pub fn lookup_key(&self) -> Option<String> {
        if self.has_no_milk() {
            return None;
        }
        let milk = self.milk.as_deref().unwrap_or("");
        let texture = self.texture.as_deref().unwrap_or("");
        Some(format!("{milk}_{texture}"))
    }
}
