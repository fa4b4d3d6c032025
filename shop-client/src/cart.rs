//! Client-local cart model
//!
//! 纯内存、无持久化。按附魔 id 维护有序行；最低出价在加入时校验，
//! 结账时不再对可能变化的最低价复检（与店面行为一致）。

use shared::{Enchantment, OrderItemInput, SubmitOrderRequest};
use thiserror::Error;

/// Why an add was rejected
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    #[error("offer ${offered} is below the minimum price ${minimum}")]
    OfferTooLow { offered: f64, minimum: f64 },

    #[error("out of stock")]
    OutOfStock,

    #[error("stock limit reached: only {available} available")]
    StockLimit { available: i64 },
}

/// One cart line
#[derive(Debug, Clone)]
pub struct CartLine {
    pub enchantment: Enchantment,
    pub quantity: i64,
    /// Buyer-chosen price per unit
    pub offered_price: f64,
}

impl CartLine {
    pub fn line_total(&self) -> f64 {
        self.offered_price * self.quantity as f64
    }
}

/// In-memory cart, ordered by insertion
#[derive(Debug, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of an enchantment at the given offered price.
    ///
    /// Increments the existing line when present (keeping the freshly
    /// offered price), appends a new line otherwise. Quantity is capped
    /// at the entry's available stock.
    pub fn add(&mut self, enchantment: &Enchantment, offered_price: f64) -> Result<(), CartError> {
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.enchantment.id == enchantment.id)
        {
            if line.quantity >= enchantment.stock {
                return Err(CartError::StockLimit {
                    available: enchantment.stock,
                });
            }
            line.quantity += 1;
            line.offered_price = offered_price;
            return Ok(());
        }

        if enchantment.stock == 0 {
            return Err(CartError::OutOfStock);
        }
        if offered_price < enchantment.price {
            return Err(CartError::OfferTooLow {
                offered: offered_price,
                minimum: enchantment.price,
            });
        }

        self.lines.push(CartLine {
            enchantment: enchantment.clone(),
            quantity: 1,
            offered_price,
        });
        Ok(())
    }

    /// Set a line's quantity; zero or below removes the line
    pub fn set_quantity(&mut self, enchantment_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(enchantment_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.enchantment.id == enchantment_id)
        {
            line.quantity = quantity;
        }
    }

    /// Remove a line
    pub fn remove(&mut self, enchantment_id: &str) {
        self.lines.retain(|line| line.enchantment.id != enchantment_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of cart lines
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Σ offered price × quantity across lines
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(|line| line.line_total()).sum()
    }

    /// Wire form of the cart lines
    pub fn to_order_items(&self) -> Vec<OrderItemInput> {
        self.lines
            .iter()
            .map(|line| OrderItemInput {
                enchantment: line.enchantment.name.clone(),
                enchantment_id: line.enchantment.id.clone(),
                offered_price: line.offered_price,
                quantity: line.quantity,
            })
            .collect()
    }

    /// Build the submission payload
    pub fn to_submit_request(
        &self,
        discord_username: impl Into<String>,
        minecraft_username: impl Into<String>,
    ) -> SubmitOrderRequest {
        SubmitOrderRequest {
            discord_username: discord_username.into(),
            minecraft_username: minecraft_username.into(),
            items: self.to_order_items(),
            total_price: self.total_price(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sharpness(stock: i64) -> Enchantment {
        Enchantment {
            id: "enchantment:sharpness".into(),
            name: "Sharpness".into(),
            max_level: 5,
            description: "Increases damage".into(),
            category: "Sword".into(),
            price: 10.0,
            stock,
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn add_below_minimum_is_rejected() {
        let mut cart = Cart::new();
        let err = cart.add(&sharpness(5), 9.0).unwrap_err();
        assert_eq!(
            err,
            CartError::OfferTooLow {
                offered: 9.0,
                minimum: 10.0
            }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn add_beyond_stock_is_rejected() {
        let mut cart = Cart::new();
        let ench = sharpness(2);
        cart.add(&ench, 15.0).unwrap();
        cart.add(&ench, 15.0).unwrap();
        let err = cart.add(&ench, 15.0).unwrap_err();
        assert_eq!(err, CartError::StockLimit { available: 2 });
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn out_of_stock_is_rejected() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(&sharpness(0), 15.0).unwrap_err(), CartError::OutOfStock);
    }

    #[test]
    fn quantity_zero_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(&sharpness(5), 15.0).unwrap();
        cart.set_quantity("enchantment:sharpness", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn totals_follow_offered_prices() {
        let mut cart = Cart::new();
        let ench = sharpness(5);
        cart.add(&ench, 15.0).unwrap();
        cart.add(&ench, 15.0).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_price(), 30.0);

        let request = cart.to_submit_request("steve#0001", "steve");
        assert_eq!(request.total_price, 30.0);
        assert_eq!(request.items.len(), 1);
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.items[0].line_total(), 30.0);
    }

    #[test]
    fn readd_keeps_single_line_with_fresh_offer() {
        let mut cart = Cart::new();
        let ench = sharpness(5);
        cart.add(&ench, 12.0).unwrap();
        cart.add(&ench, 14.0).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].offered_price, 14.0);
        assert_eq!(cart.lines()[0].quantity, 2);
    }
}
