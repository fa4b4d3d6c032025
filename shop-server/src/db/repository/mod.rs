//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod enchantment;
pub mod order;

// Re-exports
pub use enchantment::EnchantmentRepository;
pub use order::OrderRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// API 边界与存储的链接字段都使用 "table:id" 字符串；
// 仅在 type::thing(...) 处取纯 key。

/// Strip an optional "table:" prefix from an id string
pub fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Full "table:key" form of an id string
pub fn record_ref(table: &str, id: &str) -> String {
    format!("{}:{}", table, record_key(table, id))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_strips_table_prefix() {
        assert_eq!(record_key("enchantment", "enchantment:sharpness"), "sharpness");
        assert_eq!(record_key("enchantment", "sharpness"), "sharpness");
        assert_eq!(record_ref("order", "abc"), "order:abc");
        assert_eq!(record_ref("order", "order:abc"), "order:abc");
    }
}
