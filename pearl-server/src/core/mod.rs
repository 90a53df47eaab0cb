//! 核心模块
//!
//! - [`config`] - 环境变量配置
//! - [`state`] - 服务器共享状态
//! - [`server`] - HTTP 服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
