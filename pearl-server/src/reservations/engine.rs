//! Reservation Engine
//!
//! 两阶段操作：第一阶段（必须成功）是落库 + 审计；第二阶段
//! （尽力而为）是确认发送与经理通知，由 NotificationService 异步完成，
//! 失败不回滚预订。
//!
//! 创建前重新执行可用性检查，收窄「展示可用 → 实际下单」之间的竞态
//! 窗口；残余的 check-then-act 竞态是记录在案的已接受风险。

use std::sync::Arc;

use shared::{LogKind, LogSeverity, ReservationStatus, Role};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use validator::Validate;

use crate::auth::{CurrentUser, require_owner_or_role, require_role};
use crate::db::models::{Reservation, ReservationCreate};
use crate::db::repository::{
    DiningTableRepository, ReservationRepository, now_rfc3339, parse_record_id,
};
use crate::reservations::availability::{AvailabilityEngine, AvailabilityQuery};
use crate::services::{AuditService, NotificationService};
use crate::utils::{AppError, AppResult, time};

const STAFF: &[Role] = &[Role::Admin, Role::Manager];

#[derive(Clone)]
pub struct ReservationEngine {
    reservations: ReservationRepository,
    tables: DiningTableRepository,
    availability: AvailabilityEngine,
    audit: AuditService,
    notifier: Arc<NotificationService>,
}

impl ReservationEngine {
    pub fn new(db: Surreal<Db>, audit: AuditService, notifier: Arc<NotificationService>) -> Self {
        Self {
            reservations: ReservationRepository::new(db.clone()),
            tables: DiningTableRepository::new(db.clone()),
            availability: AvailabilityEngine::new(db),
            audit,
            notifier,
        }
    }

    /// Book a table after re-verifying it is still free
    pub async fn create(
        &self,
        data: ReservationCreate,
        requesting: &CurrentUser,
    ) -> AppResult<Reservation> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let query = AvailabilityQuery::parse(
            data.party_size,
            &data.reservation_date,
            &data.start_time,
            &data.end_time,
        )?;

        let table_rid = parse_record_id(&data.table_id, "dining_table")?;
        let table = self
            .tables
            .find_by_id(&data.table_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Table {} not found", data.table_id)))?;

        if table.capacity < data.party_size {
            return Err(AppError::Validation(format!(
                "Table #{} seats {}, party of {} requested",
                table.table_number, table.capacity, data.party_size
            )));
        }

        // Re-check availability right before the insert. A NotFound here
        // means the requested table (or any table) is gone for the window.
        let still_free = match self.availability.get_available_tables(&query).await {
            Ok(tables) => tables.iter().any(|t| t.id.as_ref() == Some(&table_rid)),
            Err(AppError::NotFound(_)) => false,
            Err(e) => return Err(e),
        };
        if !still_free {
            return Err(AppError::Conflict(format!(
                "Table #{} is not available at the requested time",
                table.table_number
            )));
        }

        let reservation = Reservation {
            id: None,
            user_id: requesting.id.clone(),
            table_id: table_rid,
            party_size: data.party_size,
            reservation_date: query.date.format("%Y-%m-%d").to_string(),
            start_time: data.start_time,
            end_time: data.end_time,
            duration_hours: time::duration_hours(query.start, query.end),
            status: ReservationStatus::Pending,
            customer_name: data.customer_name,
            customer_email: data.customer_email,
            customer_phone: data.customer_phone,
            special_requests: data.special_requests,
            occasion: data.occasion.unwrap_or_default(),
            created_by: Some(requesting.id.clone()),
            created_at: Some(now_rfc3339()),
            updated_at: Some(now_rfc3339()),
        };

        let created = self.reservations.insert(reservation).await?;

        self.audit.record(
            "reservation.create",
            format!(
                "Reservation for table #{} on {} {}-{}",
                table.table_number,
                created.reservation_date,
                created.start_time,
                created.end_time
            ),
            LogSeverity::Info,
            LogKind::Reservation,
            Some(requesting.id.clone()),
            created.id.as_ref(),
        );

        // Phase 2: best-effort, spawned, never fails the booking
        self.notifier.notify_reservation_created(created.clone());

        Ok(created)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Reservation> {
        self.reservations
            .find_by_id_str(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    pub async fn get_all(&self) -> AppResult<Vec<Reservation>> {
        Ok(self.reservations.find_all().await?)
    }

    pub async fn get_by_user(&self, user: &surrealdb::RecordId) -> AppResult<Vec<Reservation>> {
        Ok(self.reservations.find_by_user(user).await?)
    }

    /// Staff-only status change; leaving a closed status needs `force`
    pub async fn update_status(
        &self,
        id: &str,
        new_status: ReservationStatus,
        force: bool,
        acting: &CurrentUser,
    ) -> AppResult<Reservation> {
        require_role(acting, STAFF)?;

        let existing = self.get_by_id(id).await?;
        if existing.status.is_closed() && existing.status != new_status && !force {
            return Err(AppError::Conflict(format!(
                "Reservation is {}; set force to change it",
                existing.status
            )));
        }

        let rid = existing
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Loaded reservation has no id".into()))?;
        let updated = self.reservations.set_status(&rid, new_status).await?;

        self.audit.record(
            "reservation.status",
            format!("Status {} -> {}", existing.status, new_status),
            LogSeverity::Info,
            LogKind::Reservation,
            Some(acting.id.clone()),
            Some(&rid),
        );

        Ok(updated)
    }

    /// Owner or staff may cancel; cancelling twice is an error, not a no-op
    pub async fn cancel(&self, id: &str, acting: &CurrentUser) -> AppResult<Reservation> {
        let existing = self.get_by_id(id).await?;

        require_owner_or_role(acting, &existing.user_id, STAFF)?;

        if existing.status == ReservationStatus::Cancelled {
            return Err(AppError::Validation(
                "Reservation is already cancelled".to_string(),
            ));
        }

        let rid = existing
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Loaded reservation has no id".into()))?;
        let updated = self
            .reservations
            .set_status(&rid, ReservationStatus::Cancelled)
            .await?;

        self.audit.record(
            "reservation.cancel",
            format!(
                "Reservation for {} on {} cancelled",
                existing.customer_name, existing.reservation_date
            ),
            LogSeverity::Info,
            LogKind::Reservation,
            Some(acting.id.clone()),
            Some(&rid),
        );

        Ok(updated)
    }
}
