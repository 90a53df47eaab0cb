//! Reservation Model
//!
//! 同桌同日的非取消预订时段互不重叠（半开区间 [start, end)），
//! 该不变量由可用性引擎在应用层保证。预订从不硬删除。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{Occasion, ReservationStatus};
use surrealdb::RecordId;
use validator::Validate;

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Booking owner
    #[serde(with = "serde_helpers::record_id")]
    pub user_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    pub party_size: i32,
    /// Calendar date, `YYYY-MM-DD`
    pub reservation_date: String,
    /// `HH:MM`, same-day window
    pub start_time: String,
    pub end_time: String,
    /// Derived from the window, in hours
    pub duration_hours: f64,
    #[serde(default)]
    pub status: ReservationStatus,
    /// Contact snapshot; may differ from the account profile
    pub customer_name: String,
    pub customer_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub occasion: Occasion,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub created_by: Option<RecordId>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReservationCreate {
    pub table_id: String,
    pub party_size: i32,
    pub reservation_date: String,
    pub start_time: String,
    pub end_time: String,
    #[validate(length(min = 1, max = 200))]
    pub customer_name: String,
    #[validate(email)]
    pub customer_email: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub customer_phone: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500))]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub occasion: Option<Occasion>,
}

/// Status update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
    /// Required to leave a Cancelled/Completed reservation
    #[serde(default)]
    pub force: bool,
}
