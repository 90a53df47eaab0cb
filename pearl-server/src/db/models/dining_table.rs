//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{TableFeature, TableLocation, TableStatus};
use surrealdb::RecordId;

/// Dining table entity (桌台)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub table_number: i32,
    pub capacity: i32,
    pub location: TableLocation,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub features: Vec<TableFeature>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub created_by: Option<RecordId>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    pub table_number: i32,
    pub capacity: i32,
    pub location: TableLocation,
    #[serde(default)]
    pub status: Option<TableStatus>,
    #[serde(default)]
    pub features: Vec<TableFeature>,
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<TableLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TableStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<TableFeature>>,
}
