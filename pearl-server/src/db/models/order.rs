//! Order Model
//!
//! 订单条目在创建时携带单价快照，总价一经计算不再改动。
//! 订单从不删除（审计要求），只通过状态流转变更。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{OrderStatus, OrderType, PaymentStatus};
use surrealdb::RecordId;

/// Snapshotted order line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Name at order time
    pub name: String,
    /// Unit price at order time
    pub unit_price: f64,
    pub quantity: i32,
    pub line_total: f64,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub customer_id: RecordId,
    /// Denormalized snapshot of the customer's name
    pub customer_name: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    /// Fixed at creation; later menu price changes never touch it
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// One requested line in an order-creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    /// Absent or non-positive quantity is coerced to 1
    #[serde(default)]
    pub quantity: Option<i32>,
}

/// Create order payload
///
/// `items` 缺省时从客户的活动购物车取货。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderItemInput>>,
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub payment_status: Option<PaymentStatus>,
    #[serde(default)]
    pub customer_notes: Option<String>,
}

/// Status update payload (either field optional, at least one required)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OrderStatusUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}
