//! Reservation Repository
//!
//! 预订从不硬删除；取消也只是状态变更。

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, parse_record_id};
use crate::db::models::Reservation;
use shared::ReservationStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "reservation";

#[derive(Clone)]
pub struct ReservationRepository {
    base: BaseRepository,
}

impl ReservationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn insert(&self, reservation: Reservation) -> RepoResult<Reservation> {
        let created: Option<Reservation> =
            self.base.db().create(TABLE).content(reservation).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create reservation".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Reservation>> {
        let reservation: Option<Reservation> = self.base.db().select(id.clone()).await?;
        Ok(reservation)
    }

    pub async fn find_by_id_str(&self, id: &str) -> RepoResult<Option<Reservation>> {
        let rid = parse_record_id(id, TABLE)?;
        self.find_by_id(&rid).await
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query("SELECT * FROM reservation ORDER BY reservation_date, start_time")
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// Non-cancelled reservations for one calendar date (day-bucketed)
    ///
    /// 冲突检测的读路径：只看当天、只排除 CANCELLED。
    pub async fn find_blocking_by_date(&self, date: &str) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE reservation_date = $date AND status != $cancelled",
            )
            .bind(("date", date.to_string()))
            .bind(("cancelled", ReservationStatus::Cancelled))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    /// All reservations booked by one user, newest date first
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<Reservation>> {
        let reservations: Vec<Reservation> = self
            .base
            .db()
            .query(
                "SELECT * FROM reservation WHERE user_id = $user ORDER BY reservation_date DESC, start_time DESC",
            )
            .bind(("user", user.to_string()))
            .await?
            .take(0)?;
        Ok(reservations)
    }

    pub async fn set_status(
        &self,
        id: &RecordId,
        status: ReservationStatus,
    ) -> RepoResult<Reservation> {
        #[derive(serde::Serialize)]
        struct Patch {
            status: ReservationStatus,
            updated_at: String,
        }

        let updated: Option<Reservation> = self
            .base
            .db()
            .update(id.clone())
            .merge(Patch {
                status,
                updated_at: now_rfc3339(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Reservation {} not found", id)))
    }
}
