//! 购物车模块
//!
//! 单一隐式状态：购物车不会被显式结清，结账时只是被清空。

pub mod engine;

pub use engine::CartEngine;
