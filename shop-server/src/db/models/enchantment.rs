//! Enchantment Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::serde_helpers;

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enchantment {
    #[serde(
        default,
        with = "serde_helpers::option_record_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default = "default_max_level")]
    pub max_level: i32,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Minimum acceptable offer per unit
    pub price: f64,
    /// Authoritative availability counter, clamped at 0 on decrement
    pub stock: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_max_level() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

impl Enchantment {
    pub fn new(data: shared::EnchantmentCreate) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: None,
            name: data.name,
            max_level: data.max_level,
            description: data.description,
            category: data.category,
            price: data.price,
            stock: data.stock.max(0),
            is_active: data.is_active,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        }
    }

    /// Apply a partial update, refreshing `updated_at`.
    ///
    /// 手动库存设置在此处落地（下限 0）
    pub fn apply(&mut self, data: shared::EnchantmentUpdate) {
        if let Some(name) = data.name {
            self.name = name;
        }
        if let Some(max_level) = data.max_level {
            self.max_level = max_level;
        }
        if let Some(description) = data.description {
            self.description = description;
        }
        if let Some(category) = data.category {
            self.category = category;
        }
        if let Some(price) = data.price {
            self.price = price;
        }
        if let Some(stock) = data.stock {
            self.stock = stock.max(0);
        }
        if let Some(is_active) = data.is_active {
            self.is_active = is_active;
        }
        self.updated_at = Some(chrono::Utc::now().to_rfc3339());
    }
}
