//! 定价模块
//!
//! - [`money`] - Decimal 计算 / f64 存储的货币换算
//! - [`resolver`] - 批量解析当前菜单价并计算合计
//!
//! 购物车与订单共用同一个解析器；订单在创建时把解析结果
//! 作为快照固化。

pub mod money;
pub mod resolver;

pub use resolver::{LineRequest, MissingItemPolicy, PricedLine, PricedOrder, PricingResolver};
