//! DB model → wire view conversions

use crate::db::models::{Enchantment, Order, OrderItem};

pub fn enchantment_view(e: Enchantment) -> shared::Enchantment {
    shared::Enchantment {
        id: e.id.map(|id| id.to_string()).unwrap_or_default(),
        name: e.name,
        max_level: e.max_level,
        description: e.description,
        category: e.category,
        price: e.price,
        stock: e.stock,
        is_active: e.is_active,
        created_at: e.created_at,
        updated_at: e.updated_at,
    }
}

pub fn order_view(o: Order) -> shared::Order {
    shared::Order {
        id: o.id.map(|id| id.to_string()).unwrap_or_default(),
        discord_username: o.discord_username,
        minecraft_username: o.minecraft_username,
        item_count: o.item_count,
        total_price: o.total_price,
        status: o.status,
        created_at: o.created_at,
    }
}

pub fn order_item_view(i: OrderItem) -> shared::OrderItem {
    shared::OrderItem {
        id: i.id.map(|id| id.to_string()).unwrap_or_default(),
        order_id: i.order_id,
        enchantment_id: i.enchantment_id,
        enchantment_name: i.enchantment_name,
        price: i.price,
        quantity: i.quantity,
    }
}
