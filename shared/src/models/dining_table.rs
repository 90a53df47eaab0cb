//! Dining table enumerations (桌台)

use serde::{Deserialize, Serialize};

/// Table operational status
///
/// Maintenance tables never appear in availability results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableStatus {
    Available,
    Occupied,
    Maintenance,
}

impl Default for TableStatus {
    fn default() -> Self {
        TableStatus::Available
    }
}

/// Table location
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableLocation {
    Indoor,
    Outdoor,
    Patio,
    Private,
    Window,
    Bar,
}

/// Table feature tags
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableFeature {
    WindowView,
    Wheelchair,
    HighChair,
    PowerOutlet,
    Quiet,
    NearBar,
}
