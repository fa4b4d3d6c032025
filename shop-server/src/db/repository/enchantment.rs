//! Enchantment Repository

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::Enchantment;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ENCHANTMENT_TABLE: &str = "enchantment";

#[derive(Clone)]
pub struct EnchantmentRepository {
    base: BaseRepository,
}

impl EnchantmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all active (shop-visible) enchantments
    pub async fn find_active(&self) -> RepoResult<Vec<Enchantment>> {
        let enchantments: Vec<Enchantment> = self
            .base
            .db()
            .query("SELECT * FROM enchantment WHERE is_active = true ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(enchantments)
    }

    /// Find all enchantments, hidden ones included (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<Enchantment>> {
        let enchantments: Vec<Enchantment> = self
            .base
            .db()
            .query("SELECT * FROM enchantment ORDER BY category, name")
            .await?
            .take(0)?;
        Ok(enchantments)
    }

    /// Find enchantment by id ("enchantment:key" or bare key)
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Enchantment>> {
        let key = record_key(ENCHANTMENT_TABLE, id);
        let enchantment: Option<Enchantment> =
            self.base.db().select((ENCHANTMENT_TABLE, key)).await?;
        Ok(enchantment)
    }

    /// Whether the catalog has any entries at all (seed check)
    pub async fn is_empty(&self) -> RepoResult<bool> {
        let first: Vec<Enchantment> = self
            .base
            .db()
            .query("SELECT * FROM enchantment LIMIT 1")
            .await?
            .take(0)?;
        Ok(first.is_empty())
    }

    /// Create a new catalog entry
    pub async fn create(&self, data: shared::EnchantmentCreate) -> RepoResult<Enchantment> {
        if data.price < 0.0 {
            return Err(RepoError::Validation("price must not be negative".into()));
        }
        let enchantment = Enchantment::new(data);
        let created: Option<Enchantment> = self
            .base
            .db()
            .create(ENCHANTMENT_TABLE)
            .content(enchantment)
            .await?;
        created.ok_or_else(|| RepoError::Database("create returned no record".into()))
    }

    /// Create a catalog entry under a fixed key (seeding)
    pub async fn create_with_key(
        &self,
        key: &str,
        data: shared::EnchantmentCreate,
    ) -> RepoResult<Enchantment> {
        let enchantment = Enchantment::new(data);
        let created: Option<Enchantment> = self
            .base
            .db()
            .create((ENCHANTMENT_TABLE, key))
            .content(enchantment)
            .await?;
        created.ok_or_else(|| RepoError::Database("create returned no record".into()))
    }

    /// Apply a partial update (admin: price, manual stock set, visibility, text)
    pub async fn update(
        &self,
        id: &str,
        data: shared::EnchantmentUpdate,
    ) -> RepoResult<Enchantment> {
        let key = record_key(ENCHANTMENT_TABLE, id);
        let mut enchantment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Enchantment {} not found", id)))?;

        enchantment.apply(data);
        // id 由资源路径提供，content 里不带
        enchantment.id = None;

        let updated: Option<Enchantment> = self
            .base
            .db()
            .update((ENCHANTMENT_TABLE, key))
            .content(enchantment)
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Enchantment {} not found", id)))
    }

    /// Remove a catalog entry
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(ENCHANTMENT_TABLE, id);
        let deleted: Option<Enchantment> =
            self.base.db().delete((ENCHANTMENT_TABLE, key)).await?;
        Ok(deleted.is_some())
    }
}
