//! Dining Table Repository
//!
//! 桌台创建必须带创建者，不走通用 Repository trait。

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, parse_record_id};
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::TableStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "dining_table";

#[derive(Clone)]
pub struct DiningTableRepository {
    base: BaseRepository,
}

impl DiningTableRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table ORDER BY table_number")
            .await?
            .take(0)?;
        Ok(tables)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        let rid = parse_record_id(id, TABLE)?;
        let table: Option<DiningTable> = self.base.db().select(rid).await?;
        Ok(table)
    }

    /// Find table by its public number
    pub async fn find_by_number(&self, table_number: i32) -> RepoResult<Option<DiningTable>> {
        let table: Option<DiningTable> = self
            .base
            .db()
            .query("SELECT * FROM dining_table WHERE table_number = $n LIMIT 1")
            .bind(("n", table_number))
            .await?
            .take(0)?;
        Ok(table)
    }

    /// Candidate tables for a party: enough seats, not under maintenance
    pub async fn find_with_capacity(&self, party_size: i32) -> RepoResult<Vec<DiningTable>> {
        let tables: Vec<DiningTable> = self
            .base
            .db()
            .query(
                "SELECT * FROM dining_table WHERE capacity >= $size AND status != $maintenance ORDER BY capacity",
            )
            .bind(("size", party_size))
            .bind(("maintenance", TableStatus::Maintenance))
            .await?
            .take(0)?;
        Ok(tables)
    }

    /// Create with an explicit creator reference
    pub async fn create_by(
        &self,
        data: DiningTableCreate,
        created_by: RecordId,
    ) -> RepoResult<DiningTable> {
        if data.capacity < 1 {
            return Err(RepoError::Validation(format!(
                "Capacity must be at least 1, got {}",
                data.capacity
            )));
        }
        if self.find_by_number(data.table_number).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Table #{} already exists",
                data.table_number
            )));
        }

        let table = DiningTable {
            id: None,
            table_number: data.table_number,
            capacity: data.capacity,
            location: data.location,
            status: data.status.unwrap_or_default(),
            features: data.features,
            created_by: Some(created_by),
            created_at: Some(now_rfc3339()),
            updated_at: Some(now_rfc3339()),
        };

        let created: Option<DiningTable> = self.base.db().create(TABLE).content(table).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create dining table".to_string()))
    }

    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        let rid = parse_record_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))?;

        if let Some(capacity) = data.capacity
            && capacity < 1
        {
            return Err(RepoError::Validation(format!(
                "Capacity must be at least 1, got {}",
                capacity
            )));
        }

        // Duplicate number check when renumbering
        if let Some(n) = data.table_number
            && let Some(found) = self.find_by_number(n).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!("Table #{} already exists", n)));
        }

        #[derive(serde::Serialize)]
        struct Patch {
            #[serde(flatten)]
            data: DiningTableUpdate,
            updated_at: String,
        }

        let updated: Option<DiningTable> = self
            .base
            .db()
            .update(rid)
            .merge(Patch {
                data,
                updated_at: now_rfc3339(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Table {} not found", id)))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_record_id(id, TABLE)?;
        let deleted: Option<DiningTable> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
