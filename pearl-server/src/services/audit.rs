//! Audit Service
//!
//! 写失败只记 tracing，绝不向上传播——审计不是主流程的一部分。

use shared::{LogKind, LogSeverity};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

use crate::db::models::AuditLog;
use crate::db::repository::AuditLogRepository;

/// Fire-and-forget audit sink
#[derive(Clone)]
pub struct AuditService {
    repo: AuditLogRepository,
}

impl AuditService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: AuditLogRepository::new(db),
        }
    }

    /// Queue one entry; returns immediately
    pub fn record(
        &self,
        action: &str,
        description: String,
        severity: LogSeverity,
        kind: LogKind,
        user_id: Option<RecordId>,
        affected: Option<&RecordId>,
    ) {
        let entry = AuditLog {
            id: None,
            action: action.to_string(),
            description,
            severity,
            kind,
            user_id,
            affected_id: affected.map(|id| id.to_string()),
            affected_table: affected.map(|id| id.table().to_string()),
            performed_at: chrono::Utc::now().to_rfc3339(),
        };

        let repo = self.repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.insert(entry).await {
                tracing::warn!(target: "audit", error = %e, "Failed to write audit log entry");
            }
        });
    }
}
