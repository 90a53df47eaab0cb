//! Notification Service
//!
//! 预订落库后的第二阶段：给客人发确认、给经理发站内通知。
//! 整个阶段尽力而为——任何失败只记日志，预订本身已经成立。
//!
//! 经理通知按 (reservation, recipient) 去重：同一预订未读时不重复投递。

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use shared::Role;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

use crate::db::models::{Notification, Reservation};
use crate::db::repository::{NotificationRepository, UserRepository};
use crate::utils::AppResult;

/// Outbound confirmation channel (delivery itself is an external concern)
#[async_trait]
pub trait ConfirmationSender: Send + Sync {
    async fn send_reservation_confirmation(&self, reservation: &Reservation)
    -> Result<(), String>;
}

/// Default sender: records the dispatch, delivers nothing
pub struct LogConfirmationSender;

#[async_trait]
impl ConfirmationSender for LogConfirmationSender {
    async fn send_reservation_confirmation(
        &self,
        reservation: &Reservation,
    ) -> Result<(), String> {
        tracing::info!(
            target: "notify",
            email = %reservation.customer_email,
            date = %reservation.reservation_date,
            "Reservation confirmation dispatched"
        );
        Ok(())
    }
}

pub struct NotificationService {
    users: UserRepository,
    notifications: NotificationRepository,
    sender: Arc<dyn ConfirmationSender>,
    /// Fast-path dedup: "reservation|recipient" keys with an unread notification
    unread: DashMap<String, ()>,
}

impl NotificationService {
    pub fn new(db: Surreal<Db>, sender: Arc<dyn ConfirmationSender>) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            notifications: NotificationRepository::new(db),
            sender,
            unread: DashMap::new(),
        }
    }

    /// Phase-2 side effect after a reservation is persisted.
    /// Spawned; never blocks or fails the caller.
    pub fn notify_reservation_created(self: &Arc<Self>, reservation: Reservation) {
        let service = Arc::clone(self);
        tokio::spawn(async move {
            service.deliver(reservation).await;
        });
    }

    /// The actual delivery pass (synchronous path, errors already absorbed)
    pub async fn deliver(&self, reservation: Reservation) {
        if let Err(e) = self
            .sender
            .send_reservation_confirmation(&reservation)
            .await
        {
            tracing::warn!(target: "notify", error = %e, "Confirmation dispatch failed");
        }

        let Some(reservation_id) = reservation.id.clone() else {
            tracing::warn!(target: "notify", "Reservation without id; skipping manager notify");
            return;
        };

        let managers = match self.users.find_by_role(Role::Manager).await {
            Ok(users) => users,
            Err(e) => {
                tracing::warn!(target: "notify", error = %e, "Failed to load managers");
                return;
            }
        };

        let message = format!(
            "New reservation by {} on {} {}-{} (party of {})",
            reservation.customer_name,
            reservation.reservation_date,
            reservation.start_time,
            reservation.end_time,
            reservation.party_size
        );

        for manager in managers {
            let Some(recipient) = manager.id else { continue };
            if let Err(e) = self
                .notify_once(&recipient, &reservation_id, &message)
                .await
            {
                tracing::warn!(
                    target: "notify",
                    recipient = %recipient,
                    error = %e,
                    "Manager notification failed"
                );
            }
        }
    }

    /// Deliver unless an unread notification for this pair already exists
    async fn notify_once(
        &self,
        recipient: &RecordId,
        reservation: &RecordId,
        message: &str,
    ) -> AppResult<()> {
        let key = dedup_key(reservation, recipient);
        if self.unread.contains_key(&key) {
            return Ok(());
        }
        if self
            .notifications
            .find_unread_for(recipient, reservation)
            .await?
            .is_some()
        {
            self.unread.insert(key, ());
            return Ok(());
        }

        self.notifications
            .insert(recipient.clone(), reservation.clone(), message.to_string())
            .await?;
        self.unread.insert(key, ());
        Ok(())
    }

    /// Feed for one user
    pub async fn feed(&self, recipient: &RecordId) -> AppResult<Vec<Notification>> {
        Ok(self.notifications.find_by_recipient(recipient).await?)
    }

    /// Mark read and allow future re-notification for the pair
    pub async fn mark_read(&self, id: &RecordId) -> AppResult<Notification> {
        let updated = self.notifications.mark_read(id).await?;
        self.unread
            .remove(&dedup_key(&updated.reservation, &updated.recipient));
        Ok(updated)
    }
}

fn dedup_key(reservation: &RecordId, recipient: &RecordId) -> String {
    format!("{}|{}", reservation, recipient)
}
