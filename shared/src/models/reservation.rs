//! Reservation enumerations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl ReservationStatus {
    /// Cancelled / Completed are closed; leaving them requires an
    /// explicit override by staff.
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            ReservationStatus::Cancelled | ReservationStatus::Completed
        )
    }

    /// Non-cancelled reservations block the table for their window.
    pub fn blocks_table(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "PENDING",
            ReservationStatus::Confirmed => "CONFIRMED",
            ReservationStatus::Cancelled => "CANCELLED",
            ReservationStatus::Completed => "COMPLETED",
            ReservationStatus::NoShow => "NO_SHOW",
        }
    }
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Pending
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occasion tag attached to a reservation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Occasion {
    #[default]
    None,
    Birthday,
    Anniversary,
    Business,
    Date,
    Celebration,
    Other,
}
