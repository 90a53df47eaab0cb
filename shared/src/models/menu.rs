//! Menu enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Menu item category (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuCategory {
    Appetizer,
    Main,
    Dessert,
    Beverage,
    Side,
    Special,
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MenuCategory::Appetizer => "APPETIZER",
            MenuCategory::Main => "MAIN",
            MenuCategory::Dessert => "DESSERT",
            MenuCategory::Beverage => "BEVERAGE",
            MenuCategory::Side => "SIDE",
            MenuCategory::Special => "SPECIAL",
        };
        f.write_str(s)
    }
}
