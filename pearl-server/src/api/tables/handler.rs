//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::Role;

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::DiningTableRepository;
use crate::reservations::AvailabilityQuery;
use crate::utils::{AppError, AppResult};

const STAFF: &[Role] = &[Role::Admin, Role::Manager];

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await?;
    Ok(Json(tables))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Table {} not found", id)))?;
    Ok(Json(table))
}

#[derive(Debug, Deserialize)]
pub struct AvailableParams {
    pub party_size: i32,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

/// GET /api/tables/available - 查询时段内可用桌台
pub async fn available(
    State(state): State<ServerState>,
    Query(params): Query<AvailableParams>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let query = AvailabilityQuery::parse(
        params.party_size,
        &params.date,
        &params.start_time,
        &params.end_time,
    )?;
    let tables = state.availability_engine().get_available_tables(&query).await?;
    Ok(Json(tables))
}

/// POST /api/tables - 创建桌台 (staff)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    require_role(&user, STAFF)?;

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create_by(payload, user.id.clone()).await?;
    Ok(Json(table))
}

/// PUT /api/tables/:id - 更新桌台 (staff)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    require_role(&user, STAFF)?;

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/tables/:id - 删除桌台 (admin only)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    require_role(&user, &[Role::Admin])?;

    let repo = DiningTableRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    Ok(Json(deleted))
}
