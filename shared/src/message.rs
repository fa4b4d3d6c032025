//! Catalog sync messages
//!
//! 资源变更通知。服务器在每次目录/订单变更后广播一条消息，
//! 客户端据此失效本地缓存视图。投递是尽力而为的：无顺序保证，
//! 慢消费者会丢帧。

use serde::{Deserialize, Serialize};

/// One resource-change notification frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncMessage {
    /// Resource kind: "enchantment" | "order"
    pub resource: String,
    /// What happened: "created" | "updated" | "deleted" | "stock_changed" | ...
    pub action: String,
    /// Affected record id ("table:key"), if a single record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Monotonic per-resource version, lets clients discard stale frames
    pub version: u64,
    /// Emission timestamp, RFC 3339
    pub timestamp: String,
}

impl SyncMessage {
    pub fn new(resource: &str, action: &str, id: Option<String>, version: u64) -> Self {
        Self {
            resource: resource.to_string(),
            action: action.to_string(),
            id,
            version,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
