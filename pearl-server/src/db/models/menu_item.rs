//! Menu Item Model
//!
//! 价格是即时值，不做版本化；订单在创建时快照价格。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::MenuCategory;
use surrealdb::RecordId;
use validator::Validate;

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: MenuCategory,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: f64,
    pub category: MenuCategory,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MenuCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}
