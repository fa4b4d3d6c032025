//! Shared types for EnchantShop
//!
//! Wire-level types used by both the server and the client:
//! catalog views, order views, request/response payloads and
//! catalog sync messages.

pub mod catalog;
pub mod message;
pub mod order;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use catalog::{Enchantment, EnchantmentCreate, EnchantmentUpdate};
pub use message::SyncMessage;
pub use order::{
    AdminOrderAck, AdminOrderAction, AdminOrderListResponse, AdminOrderRequest, Order, OrderItem,
    OrderItemInput, OrderStatus, SubmitOrderRequest, SubmitOrderResponse,
};
