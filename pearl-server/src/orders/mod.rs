//! 订单模块
//!
//! 订单总价在创建时由定价解析器快照，此后不再重算。

pub mod lifecycle;

pub use lifecycle::OrderService;
