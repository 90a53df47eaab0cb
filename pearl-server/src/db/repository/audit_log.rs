//! Audit Log Repository (append-only)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::AuditLog;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "audit_log";

#[derive(Clone)]
pub struct AuditLogRepository {
    base: BaseRepository,
}

impl AuditLogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append an entry; the core never reads these back
    pub async fn insert(&self, entry: AuditLog) -> RepoResult<AuditLog> {
        let created: Option<AuditLog> = self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to write audit log".to_string()))
    }
}
