//! Audit log enumerations

use serde::{Deserialize, Serialize};

/// Severity of an audit entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// Subsystem that produced the entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogKind {
    Auth,
    Order,
    Reservation,
    Cart,
    Menu,
    Table,
    User,
    System,
}
