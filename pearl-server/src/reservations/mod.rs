//! 预订模块
//!
//! - [`availability`] - 桌台可用性计算与时段冲突检测
//! - [`engine`] - 预订创建/取消/状态流转

pub mod availability;
pub mod engine;

pub use availability::{AvailabilityEngine, AvailabilityQuery};
pub use engine::ReservationEngine;
