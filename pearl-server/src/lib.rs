//! Pearl Server - 餐厅管理系统后端
//!
//! # 架构概述
//!
//! 本模块是 Pearl 后端的主入口，核心是三个领域引擎：
//!
//! - **预订可用性** (`reservations`): 桌台可用性与时段冲突检测
//! - **购物车** (`cart`): 条目变更与派生总价重算
//! - **订单** (`orders`): 价格快照与状态生命周期
//!
//! 外加被它们共享的定价解析器 (`pricing`) 与角色/所有权守卫 (`auth`)。
//!
//! # 模块结构
//!
//! ```text
//! pearl-server/src/
//! ├── core/          # 配置、状态、HTTP 服务器
//! ├── auth/          # 身份提取、角色/所有权守卫
//! ├── pricing/       # 定价解析器（购物车与订单共用）
//! ├── cart/          # 购物车引擎
//! ├── orders/        # 订单生命周期
//! ├── reservations/  # 可用性与预订引擎
//! ├── services/      # 审计落库、通知分发
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、时间工具
//! └── db/            # 数据库层（模型 + 仓储）
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod reservations;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::CurrentUser;
pub use cart::CartEngine;
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use pricing::{MissingItemPolicy, PricingResolver};
pub use reservations::{AvailabilityEngine, ReservationEngine};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ____                  __
   / __ \___  ____ ______/ /
  / /_/ / _ \/ __ `/ ___/ /
 / ____/  __/ /_/ / /  / /
/_/    \___/\__,_/_/  /_/
"#
    );
}
