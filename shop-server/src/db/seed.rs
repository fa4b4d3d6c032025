//! Catalog seed data
//!
//! 首次启动时写入默认附魔目录。价格/库存使用商店默认值，
//! 之后全部由后台管理。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::{EnchantmentRepository, RepoResult};

/// Default minimum offer for seeded entries
const DEFAULT_PRICE: f64 = 10.0;
/// Default stock for seeded entries
const DEFAULT_STOCK: i64 = 10;

/// (key, name, max_level, description, category)
const SEED_ENCHANTMENTS: &[(&str, &str, i32, &str, &str)] = &[
    // Armor
    ("protection", "Protection", 4, "Reduces most types of damage", "Armor"),
    ("fire_protection", "Fire Protection", 4, "Reduces fire damage and burn time", "Armor"),
    ("blast_protection", "Blast Protection", 4, "Reduces explosion damage", "Armor"),
    ("projectile_protection", "Projectile Protection", 4, "Reduces projectile damage", "Armor"),
    ("thorns", "Thorns", 3, "Damages attackers", "Armor"),
    // Helmet
    ("respiration", "Respiration", 3, "Extends underwater breathing time", "Helmet"),
    ("aqua_affinity", "Aqua Affinity", 1, "Increases underwater mining speed", "Helmet"),
    // Boots
    ("feather_falling", "Feather Falling", 4, "Reduces fall damage", "Boots"),
    ("depth_strider", "Depth Strider", 3, "Increases underwater movement speed", "Boots"),
    ("frost_walker", "Frost Walker", 2, "Freezes water beneath the player", "Boots"),
    ("soul_speed", "Soul Speed", 3, "Increases speed on soul sand and soul soil", "Boots"),
    ("swift_sneak", "Swift Sneak", 3, "Increases sneaking speed", "Boots"),
    // Sword
    ("sharpness", "Sharpness", 5, "Increases damage", "Sword"),
    ("smite", "Smite", 5, "Increases damage to undead mobs", "Sword"),
    ("bane_of_arthropods", "Bane of Arthropods", 5, "Increases damage to arthropods", "Sword"),
    ("knockback", "Knockback", 2, "Increases knockback", "Sword"),
    ("fire_aspect", "Fire Aspect", 2, "Sets target on fire", "Sword"),
    ("looting", "Looting", 3, "Increases mob drops", "Sword"),
    ("sweeping_edge", "Sweeping Edge", 3, "Increases sweeping attack damage", "Sword"),
    // Tools
    ("efficiency", "Efficiency", 5, "Increases mining speed", "Tools"),
    ("silk_touch", "Silk Touch", 1, "Mined blocks drop themselves", "Tools"),
    ("fortune", "Fortune", 3, "Increases certain block drops", "Tools"),
    // Bow
    ("power", "Power", 5, "Increases arrow damage", "Bow"),
    ("punch", "Punch", 2, "Increases arrow knockback", "Bow"),
    ("flame", "Flame", 1, "Arrows set target on fire", "Bow"),
    ("infinity", "Infinity", 1, "Shooting consumes no arrows", "Bow"),
    // Crossbow
    ("multishot", "Multishot", 1, "Shoots 3 arrows at once", "Crossbow"),
    ("piercing", "Piercing", 4, "Arrows pass through entities", "Crossbow"),
    ("quick_charge", "Quick Charge", 3, "Decreases crossbow charging time", "Crossbow"),
    // Trident
    ("loyalty", "Loyalty", 3, "Trident returns after being thrown", "Trident"),
    ("impaling", "Impaling", 5, "Extra damage to aquatic mobs", "Trident"),
    ("riptide", "Riptide", 3, "Trident launches player in water", "Trident"),
    ("channeling", "Channeling", 1, "Summons lightning on hit during storms", "Trident"),
    // Fishing Rod
    ("luck_of_the_sea", "Luck of the Sea", 3, "Increases luck while fishing", "Fishing Rod"),
    ("lure", "Lure", 3, "Decreases wait time for fish", "Fishing Rod"),
    // Universal
    ("unbreaking", "Unbreaking", 3, "Increases item durability", "Universal"),
    ("mending", "Mending", 1, "Repairs item using XP", "Universal"),
];

/// Seed the catalog when it is empty. Returns the number of entries written.
pub async fn seed_catalog_if_empty(db: &Surreal<Db>) -> RepoResult<usize> {
    let repo = EnchantmentRepository::new(db.clone());
    if !repo.is_empty().await? {
        return Ok(0);
    }

    for (key, name, max_level, description, category) in SEED_ENCHANTMENTS {
        repo.create_with_key(
            key,
            shared::EnchantmentCreate {
                name: (*name).to_string(),
                max_level: *max_level,
                description: (*description).to_string(),
                category: (*category).to_string(),
                price: DEFAULT_PRICE,
                stock: DEFAULT_STOCK,
                is_active: true,
            },
        )
        .await?;
    }

    Ok(SEED_ENCHANTMENTS.len())
}
