//! Database Models

pub mod enchantment;
pub mod order;
pub mod serde_helpers;

pub use enchantment::Enchantment;
pub use order::{AdjustmentDirection, Order, OrderItem, StockAdjustment};
