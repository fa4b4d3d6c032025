//! Database Module
//!
//! Handles the embedded SurrealDB instance, schema definition and seeding.

pub mod models;
pub mod repository;
pub mod seed;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "enchantshop";
const DATABASE: &str = "shop";

/// Startup schema. Tables are schemaless; the stock_adjustment table keys
/// records by idempotency token, so no extra uniqueness index is needed.
const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS enchantment SCHEMALESS;
DEFINE TABLE IF NOT EXISTS order SCHEMALESS;
DEFINE TABLE IF NOT EXISTS order_item SCHEMALESS;
DEFINE INDEX IF NOT EXISTS order_item_order ON order_item FIELDS order_id;
DEFINE TABLE IF NOT EXISTS stock_adjustment SCHEMALESS;
"#;

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the embedded database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready ({db_path})");

        // Seed the catalog on first run
        let seeded = seed::seed_catalog_if_empty(&db)
            .await
            .map_err(|e| AppError::database(format!("Catalog seed failed: {e}")))?;
        if seeded > 0 {
            tracing::info!("Seeded catalog with {seeded} enchantments");
        }

        Ok(Self { db })
    }
}
