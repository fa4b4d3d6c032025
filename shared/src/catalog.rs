//! Catalog wire types
//!
//! 商店目录的线上视图。`id` 使用 "table:key" 字符串格式，
//! 与数据库的 RecordId 在 API 边界互转。

use serde::{Deserialize, Serialize};

/// Catalog entry as served to shop and admin clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enchantment {
    pub id: String,
    pub name: String,
    pub max_level: i32,
    pub description: String,
    pub category: String,
    /// Minimum acceptable offer per unit
    pub price: f64,
    /// Authoritative availability counter
    pub stock: i64,
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Enchantment {
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }
}

/// Create payload (admin)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnchantmentCreate {
    pub name: String,
    pub max_level: i32,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Partial update payload (admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnchantmentUpdate {
    pub name: Option<String>,
    pub max_level: Option<i32>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    /// Manual stock set, floored at 0 server side
    pub stock: Option<i64>,
    pub is_active: Option<bool>,
}
