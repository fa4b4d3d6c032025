//! EnchantShop Server - 附魔商店后端
//!
//! # 架构概述
//!
//! 单进程 HTTP 服务，嵌入式数据库，提供以下核心功能：
//!
//! - **目录** (`api/enchantments`): 商店目录查询与后台库存/可见性管理
//! - **订单** (`api/orders`): 订单提交，库存扣减，Discord 通知
//! - **订单管理** (`api/admin_orders`): pending → completed/cancelled 生命周期
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **同步** (`api/sync`): 目录变更 WebSocket 推送
//!
//! # 模块结构
//!
//! ```text
//! shop-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 管理密钥校验
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (models + repositories)
//! ├── notify/        # Discord webhook 通知
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;

// Re-export 公共类型
pub use auth::AdminAuth;
pub use crate::core::{Config, Server, ServerState};
pub use notify::OrderNotifier;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ______            __                  __
   / ____/___  _____/ /_  ____ _____  __/ /_
  / __/ / __ \/ ___/ __ \/ __ `/ __ \/ __/
 / /___/ / / / /__/ / / / /_/ / / / / /_
/_____/_/ /_/\___/_/ /_/\__,_/_/ /_/\__/
   _____ __
  / ___// /_  ____  ____
  \__ \/ __ \/ __ \/ __ \
 ___/ / / / / /_/ / /_/ /
/____/_/ /_/\____/ .___/
                /_/
    "#
    );
}
