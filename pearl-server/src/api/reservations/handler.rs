//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationCreate, ReservationStatusUpdate};
use crate::db::repository::parse_record_id;
use crate::utils::AppResult;

/// POST /api/reservations - 创建预订（先复查可用性）
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_engine().create(payload, &user).await?;
    Ok(Json(reservation))
}

/// GET /api/reservations - 获取全部预订
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Reservation>>> {
    let reservations = state.reservation_engine().get_all().await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_engine().get_by_id(&id).await?;
    Ok(Json(reservation))
}

/// GET /api/reservations/user/:user_id - 某用户的预订
pub async fn list_by_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Vec<Reservation>>> {
    let rid = parse_record_id(&user_id, "user")?;
    let reservations = state.reservation_engine().get_by_user(&rid).await?;
    Ok(Json(reservations))
}

/// PATCH /api/reservations/:id/status - 状态流转 (staff)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> AppResult<Json<Reservation>> {
    let reservation = state
        .reservation_engine()
        .update_status(&id, payload.status, payload.force, &user)
        .await?;
    Ok(Json(reservation))
}

/// POST /api/reservations/:id/cancel - 取消（本人或 staff；重复取消报错）
pub async fn cancel(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let reservation = state.reservation_engine().cancel(&id, &user).await?;
    Ok(Json(reservation))
}
