use std::sync::Arc;

use dashmap::DashMap;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::broadcast;

use crate::auth::AdminAuth;
use crate::core::Config;
use crate::db::DbService;
use crate::notify::OrderNotifier;
use shared::message::SyncMessage;

/// 同步广播通道容量 - 慢消费者超出后丢帧
const SYNC_CHANNEL_CAPACITY: usize = 256;

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 用于 broadcast_sync 时自动生成递增的版本号，
/// 确保客户端可以通过版本号判断数据新旧。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc / Clone 实现浅拷贝，所有权成本极低。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | admin | AdminAuth | 管理密钥校验 |
/// | notifier | OrderNotifier | Discord webhook 通知 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
/// | sync_tx | broadcast::Sender | 目录变更广播 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 管理密钥校验
    pub admin: AdminAuth,
    /// 订单通知
    pub notifier: OrderNotifier,
    /// 资源版本管理器 (用于 broadcast_sync 自动递增版本号)
    pub resource_versions: Arc<ResourceVersions>,
    /// 目录变更广播通道
    sync_tx: broadcast::Sender<SyncMessage>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构
    /// 2. 数据库 (work_dir/database/shop.db)
    /// 3. 各服务 (AdminAuth, OrderNotifier, 同步通道)
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        // 0. Ensure work_dir structure exists
        config.ensure_work_dir_structure()?;

        // 1. Initialize DB
        let db_path = config.database_dir().join("shop.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;
        let db = db_service.db;

        // 2. Initialize services
        let admin = AdminAuth::new(&config.admin_password);
        let notifier = OrderNotifier::new(config.discord_webhook_url.clone());
        let (sync_tx, _) = broadcast::channel(SYNC_CHANNEL_CAPACITY);

        Ok(Self {
            config: config.clone(),
            db,
            admin,
            notifier,
            resource_versions: Arc::new(ResourceVersions::new()),
            sync_tx,
        })
    }

    /// 订阅目录变更广播
    pub fn subscribe_sync(&self) -> broadcast::Receiver<SyncMessage> {
        self.sync_tx.subscribe()
    }

    /// 广播资源变更通知
    ///
    /// 自动递增资源版本号。没有订阅者时静默丢弃。
    pub fn broadcast_sync(&self, resource: &str, action: &str, id: Option<&str>) {
        let version = self.resource_versions.increment(resource);
        let msg = SyncMessage::new(resource, action, id.map(|s| s.to_string()), version);
        if self.sync_tx.send(msg).is_err() {
            tracing::trace!(resource, action, "no sync subscribers");
        }
    }
}
