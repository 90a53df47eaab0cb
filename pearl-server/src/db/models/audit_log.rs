//! Audit Log Model
//!
//! 追加写入，核心从不读回。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{LogKind, LogSeverity};
use surrealdb::RecordId;

/// Append-only audit entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub action: String,
    pub description: String,
    pub severity: LogSeverity,
    pub kind: LogKind,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub user_id: Option<RecordId>,
    /// Id of the document the action touched, as `table:id`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_table: Option<String>,
    pub performed_at: String,
}
