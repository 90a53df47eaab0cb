//! Identity Extractor
//!
//! 信任上游网关注入的身份头：`x-user-id` / `x-user-name` / `x-user-role`。
//! 凭证校验不在本服务内进行（外部协作者）。

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::Role;
use surrealdb::RecordId;

use super::CurrentUser;
use crate::utils::AppError;

const USER_ID_HEADER: &str = "x-user-id";
const USER_NAME_HEADER: &str = "x-user-name";
const USER_ROLE_HEADER: &str = "x-user-role";

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|h| h.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let Some(raw_id) = header(USER_ID_HEADER) else {
            tracing::warn!(target: "auth", uri = %parts.uri, "Missing identity headers");
            return Err(AppError::Unauthorized);
        };

        let id: RecordId = if raw_id.contains(':') {
            raw_id
                .parse()
                .map_err(|_| AppError::Validation(format!("Malformed user id: {raw_id}")))?
        } else {
            RecordId::from_table_key("user", raw_id)
        };

        let role: Role = header(USER_ROLE_HEADER)
            .unwrap_or("CUSTOMER")
            .parse()
            .map_err(|e| AppError::Validation(format!("{e}")))?;

        let user = CurrentUser {
            id,
            name: header(USER_NAME_HEADER).unwrap_or_default().to_string(),
            role,
        };

        // Store in extensions for potential reuse
        parts.extensions.insert(user.clone());

        Ok(user)
    }
}
