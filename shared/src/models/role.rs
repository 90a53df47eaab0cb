//! User roles
//!
//! 系统只有三种角色。角色字面量只在这里出现一次。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// User role (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Manager,
    Admin,
}

impl Role {
    /// Back-office staff (may manage menu, tables, orders, reservations)
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Manager | Role::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Manager => "MANAGER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(Role::Customer),
            "MANAGER" => Ok(Role::Manager),
            "ADMIN" => Ok(Role::Admin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
