//! 授权模块
//!
//! 认证本身在上游完成；核心只拿到已认证的 `{id, role}` 主体。
//! - [`CurrentUser`] - 当前用户上下文（网关注入）
//! - [`guard`] - 纯函数角色/所有权检查

pub mod extractor;
pub mod guard;

use serde::{Deserialize, Serialize};
use shared::Role;
use surrealdb::RecordId;

use crate::db::models::serde_helpers;

/// Authenticated principal attached to a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(with = "serde_helpers::record_id")]
    pub id: RecordId,
    pub name: String,
    pub role: Role,
}

pub use guard::{require_owner_or_role, require_role};
