use crate::pricing::MissingItemPolicy;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/pearl | 工作目录（数据库、日志） |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | STRICT_PRICING | false | 缺失菜品：按 0 计价或整单拒绝 |
/// | ENFORCE_ORDER_TRANSITIONS | false | 订单状态流转白名单 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/pearl HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 工作流策略开关 ===
    /// 定价解析器遇到已不存在的菜品时是否拒绝整个操作
    pub strict_pricing: bool,
    /// 是否启用订单状态流转白名单
    pub enforce_order_transitions: bool,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/pearl".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            strict_pricing: env_flag("STRICT_PRICING", false),
            enforce_order_transitions: env_flag("ENFORCE_ORDER_TRANSITIONS", false),
        }
    }

    /// The single switchable point for missing-menu-item handling
    pub fn missing_item_policy(&self) -> MissingItemPolicy {
        if self.strict_pricing {
            MissingItemPolicy::Reject
        } else {
            MissingItemPolicy::PriceAsZero
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: "/var/lib/pearl".into(),
            http_port: 3000,
            environment: "development".into(),
            strict_pricing: false,
            enforce_order_transitions: false,
        }
    }
}

fn env_flag(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
