//! EnchantShop Client - HTTP client for the shop server
//!
//! Provides network-based HTTP calls to the shop API plus the
//! client-local cart model.

pub mod cart;
pub mod config;
pub mod error;
pub mod http;

pub use cart::{Cart, CartError, CartLine};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;

// Re-export shared types for convenience
pub use shared::{
    Enchantment, EnchantmentCreate, EnchantmentUpdate, Order, OrderItemInput, OrderStatus,
    SubmitOrderRequest, SubmitOrderResponse,
};
