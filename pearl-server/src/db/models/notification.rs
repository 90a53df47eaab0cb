//! In-app Notification Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Manager-facing in-app notification
///
/// 同一预订对同一收件人未读时不重复投递。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub recipient: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub reservation: RecordId,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: Option<String>,
}
