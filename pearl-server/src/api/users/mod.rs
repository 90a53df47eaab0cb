//! User API 模块（通知流）

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/{id}/notifications", get(handler::notifications))
        .route(
            "/{id}/notifications/{notification_id}/read",
            post(handler::mark_read),
        )
}
