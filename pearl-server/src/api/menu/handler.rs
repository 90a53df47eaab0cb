//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::Role;
use validator::Validate;

use crate::auth::{CurrentUser, require_role};
use crate::core::ServerState;
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use crate::db::repository::{MenuItemRepository, Repository};
use crate::utils::{AppError, AppResult};

const STAFF: &[Role] = &[Role::Admin, Role::Manager];

/// GET /api/menu - 获取全部菜品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let items = repo.find_all().await?;
    Ok(Json(items))
}

/// GET /api/menu/:id - 获取单个菜品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItem>> {
    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", id)))?;
    Ok(Json(item))
}

/// POST /api/menu - 创建菜品 (staff)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    require_role(&user, STAFF)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    Ok(Json(item))
}

/// PUT /api/menu/:id - 更新菜品 (staff)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    require_role(&user, STAFF)?;
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let repo = MenuItemRepository::new(state.db.clone());
    let item = repo.update(&id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/menu/:id - 删除菜品 (staff)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    require_role(&user, STAFF)?;

    let repo = MenuItemRepository::new(state.db.clone());
    let deleted = repo.delete(&id).await?;
    Ok(Json(deleted))
}
