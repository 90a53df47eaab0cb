//! Notification Repository

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339};
use crate::db::models::Notification;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "notification";

#[derive(Clone)]
pub struct NotificationRepository {
    base: BaseRepository,
}

impl NotificationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn insert(
        &self,
        recipient: RecordId,
        reservation: RecordId,
        message: String,
    ) -> RepoResult<Notification> {
        let notification = Notification {
            id: None,
            recipient,
            reservation,
            message,
            is_read: false,
            created_at: Some(now_rfc3339()),
        };
        let created: Option<Notification> =
            self.base.db().create(TABLE).content(notification).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create notification".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Notification>> {
        let found: Option<Notification> = self.base.db().select(id.clone()).await?;
        Ok(found)
    }

    /// Unread notification for (recipient, reservation), if any — dedup check
    pub async fn find_unread_for(
        &self,
        recipient: &RecordId,
        reservation: &RecordId,
    ) -> RepoResult<Option<Notification>> {
        let found: Option<Notification> = self
            .base
            .db()
            .query(
                "SELECT * FROM notification WHERE recipient = $recipient AND reservation = $reservation AND is_read = false LIMIT 1",
            )
            .bind(("recipient", recipient.to_string()))
            .bind(("reservation", reservation.to_string()))
            .await?
            .take(0)?;
        Ok(found)
    }

    /// Notification feed for one recipient, newest first
    pub async fn find_by_recipient(&self, recipient: &RecordId) -> RepoResult<Vec<Notification>> {
        let notifications: Vec<Notification> = self
            .base
            .db()
            .query(
                "SELECT * FROM notification WHERE recipient = $recipient ORDER BY created_at DESC",
            )
            .bind(("recipient", recipient.to_string()))
            .await?
            .take(0)?;
        Ok(notifications)
    }

    pub async fn mark_read(&self, id: &RecordId) -> RepoResult<Notification> {
        #[derive(serde::Serialize)]
        struct Patch {
            is_read: bool,
        }
        let updated: Option<Notification> = self
            .base
            .db()
            .update(id.clone())
            .merge(Patch { is_read: true })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Notification {} not found", id)))
    }
}
