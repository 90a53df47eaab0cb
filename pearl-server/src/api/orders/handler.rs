//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Order, OrderCreate, OrderStatusUpdate};
use crate::utils::AppResult;

/// POST /api/orders - 创建订单（显式条目或从购物车结账）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    let order = state.order_service().create_order(payload).await?;
    Ok(Json(order))
}

/// GET /api/orders - 获取全部订单
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.order_service().get_all().await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let order = state.order_service().get_by_id(&id).await?;
    Ok(Json(order))
}

/// GET /api/orders/customer/:customer_id - 某客户的订单
pub async fn list_by_customer(
    State(state): State<ServerState>,
    Path(customer_id): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = state.order_service().get_by_customer(&customer_id).await?;
    Ok(Json(orders))
}

/// PATCH /api/orders/:id/status - 更新状态/支付状态 (staff)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let order = state
        .order_service()
        .update_status(&id, payload, &user)
        .await?;
    Ok(Json(order))
}
