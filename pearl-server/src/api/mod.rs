//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu`] - 菜单管理接口
//! - [`tables`] - 桌台与可用性接口
//! - [`carts`] - 购物车接口
//! - [`orders`] - 订单接口
//! - [`reservations`] - 预订接口
//! - [`users`] - 用户通知接口
//!
//! Handler 只做提取、鉴权、调用引擎、错误映射，不承载业务逻辑。

pub mod health;

pub mod carts;
pub mod menu;
pub mod orders;
pub mod reservations;
pub mod tables;
pub mod users;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Assemble all resource routers
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(tables::router())
        .merge(carts::router())
        .merge(orders::router())
        .merge(reservations::router())
        .merge(users::router())
}
