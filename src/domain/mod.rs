//! Domain value types: [`Drink`], [`Order`], [`Batch`], and the [`Item`]
//! sum type that holds them in the live queue sequence.

pub mod batch;
pub mod drink;
pub mod ids;
pub mod item;
pub mod order;

pub use batch::Batch;
pub use drink::{Drink, NO_MILK};
pub use item::Item;
pub use order::Order;
