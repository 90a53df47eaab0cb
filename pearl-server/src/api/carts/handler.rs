//! Cart API Handlers
//!
//! 购物车接口不做角色检查：匿名购物车是一等公民。

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::Cart;
use crate::db::repository::parse_record_id;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct CartCreateRequest {
    /// Owner ("user:xxx"); absent for a guest cart
    #[serde(default)]
    pub customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub menu_item: String,
    #[serde(default)]
    pub quantity: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub quantity: i32,
}

/// POST /api/carts - 创建购物车
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CartCreateRequest>,
) -> AppResult<Json<Cart>> {
    let owner = payload
        .customer_id
        .map(|id| parse_record_id(&id, "user"))
        .transpose()?;
    let cart = state.cart_engine().create_cart(owner).await?;
    Ok(Json(cart))
}

/// GET /api/carts/:id - 获取购物车
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Cart>> {
    let cart = state.cart_engine().get_cart(&id).await?;
    Ok(Json(cart))
}

/// POST /api/carts/:id/items - 加入菜品（已存在则数量累加）
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AddItemRequest>,
) -> AppResult<Json<Cart>> {
    let cart = state
        .cart_engine()
        .add_item(&id, &payload.menu_item, payload.quantity)
        .await?;
    Ok(Json(cart))
}

/// PUT /api/carts/:id/items/:item_id - 设置数量（<=0 即移除）
pub async fn update_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(payload): Json<UpdateItemRequest>,
) -> AppResult<Json<Cart>> {
    let cart = state
        .cart_engine()
        .update_item_quantity(&id, &item_id, payload.quantity)
        .await?;
    Ok(Json(cart))
}

/// DELETE /api/carts/:id/items/:item_id - 移除菜品（幂等）
pub async fn remove_item(
    State(state): State<ServerState>,
    Path((id, item_id)): Path<(String, String)>,
) -> AppResult<Json<Cart>> {
    let cart = state.cart_engine().remove_item(&id, &item_id).await?;
    Ok(Json(cart))
}

/// POST /api/carts/:id/empty - 清空购物车
pub async fn empty(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Cart>> {
    let cart = state.cart_engine().empty_cart(&id).await?;
    Ok(Json(cart))
}
