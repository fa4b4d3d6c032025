use std::path::PathBuf;

/// 服务器配置 - 商店后端的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/enchantshop | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ADMIN_PASSWORD | (空) | 管理共享密钥 |
/// | DISCORD_WEBHOOK_URL | (无) | 订单通知 webhook |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_DIR | (无) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/shop HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 管理共享密钥（空 = 拒绝所有管理请求）
    pub admin_password: String,
    /// Discord webhook URL（未配置则跳过通知）
    pub discord_webhook_url: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志文件目录（未配置则仅输出到 stdout）
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/enchantshop".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            admin_password: std::env::var("ADMIN_PASSWORD").unwrap_or_default(),
            discord_webhook_url: std::env::var("DISCORD_WEBHOOK_URL").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库文件目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        if let Some(dir) = &self.log_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
