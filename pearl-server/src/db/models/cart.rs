//! Cart Model
//!
//! `total_price` 是派生缓存：每次条目变更都通过定价解析器重算，
//! 与条目一起写入。条目按 menu_item 唯一，数量永远 >= 1。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item: RecordId,
    pub quantity: i32,
}

/// Cart entity
///
/// `customer_id` is None for anonymous/guest carts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub customer_id: Option<RecordId>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    #[serde(default)]
    pub total_price: f64,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl Cart {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Items/total merge payload (written on every cart mutation)
#[derive(Debug, Clone, Serialize)]
pub struct CartItemsUpdate {
    pub items: Vec<CartItem>,
    pub total_price: f64,
    pub updated_at: String,
}
