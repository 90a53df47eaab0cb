//! User Notification Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::Role;

use crate::auth::{CurrentUser, require_owner_or_role};
use crate::core::ServerState;
use crate::db::models::Notification;
use crate::db::repository::{NotificationRepository, parse_record_id};
use crate::utils::{AppError, AppResult};

const STAFF: &[Role] = &[Role::Admin, Role::Manager];

/// GET /api/users/:id/notifications - 站内通知流（本人或 staff）
pub async fn notifications(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Notification>>> {
    let recipient = parse_record_id(&id, "user")?;
    require_owner_or_role(&user, &recipient, STAFF)?;

    let feed = state.notifier.feed(&recipient).await?;
    Ok(Json(feed))
}

/// POST /api/users/:id/notifications/:notification_id/read - 标记已读
pub async fn mark_read(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, notification_id)): Path<(String, String)>,
) -> AppResult<Json<Notification>> {
    let recipient = parse_record_id(&id, "user")?;
    require_owner_or_role(&user, &recipient, STAFF)?;

    let rid = parse_record_id(&notification_id, "notification")?;
    let repo = NotificationRepository::new(state.db.clone());
    let found = repo
        .find_by_id(&rid)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Notification {} not found", notification_id)))?;
    if found.recipient != recipient {
        return Err(AppError::Forbidden(
            "Notification belongs to another user".into(),
        ));
    }

    let updated = state.notifier.mark_read(&rid).await?;
    Ok(Json(updated))
}
