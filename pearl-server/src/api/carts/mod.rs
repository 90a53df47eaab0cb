//! Cart API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/carts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/items", post(handler::add_item))
        .route(
            "/{id}/items/{item_id}",
            put(handler::update_item).delete(handler::remove_item),
        )
        .route("/{id}/empty", post(handler::empty))
}
