//! Shared types for the Pearl restaurant management system
//!
//! 所有组件共用的封闭枚举集合：角色、订单/预订状态、桌台属性等。
//! 每个枚举只在这里定义一次，服务端和客户端都从这里引用，
//! 避免字面量在多处漂移。

pub mod models;

// Re-exports
pub use models::audit::{LogKind, LogSeverity};
pub use models::dining_table::{TableFeature, TableLocation, TableStatus};
pub use models::menu::MenuCategory;
pub use models::order::{OrderStatus, OrderType, PaymentStatus};
pub use models::reservation::{Occasion, ReservationStatus};
pub use models::role::Role;
