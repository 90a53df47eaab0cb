//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// People
pub mod user;

// Catalog
pub mod menu_item;

// Location
pub mod dining_table;

// Commerce
pub mod cart;
pub mod order;

// Booking
pub mod reservation;

// System
pub mod audit_log;
pub mod notification;

// Re-exports
pub use audit_log::AuditLogRepository;
pub use cart::CartRepository;
pub use dining_table::DiningTableRepository;
pub use menu_item::MenuItemRepository;
pub use notification::NotificationRepository;
pub use order::OrderRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Common repository trait for basic CRUD
#[allow(async_fn_in_trait)]
pub trait Repository<T, CreateDto, UpdateDto> {
    async fn find_all(&self) -> RepoResult<Vec<T>>;
    async fn find_by_id(&self, id: &str) -> RepoResult<Option<T>>;
    async fn create(&self, data: CreateDto) -> RepoResult<T>;
    async fn update(&self, id: &str, data: UpdateDto) -> RepoResult<T>;
    async fn delete(&self, id: &str) -> RepoResult<bool>;
}

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "menu_item:abc".parse()?;
//   - 获取表名: id.table()
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId

/// Parse a `table:id` string, validating the table prefix
pub fn parse_record_id(id: &str, table: &str) -> Result<surrealdb::RecordId, RepoError> {
    let rid: surrealdb::RecordId = id
        .parse()
        .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
    if rid.table() != table {
        return Err(RepoError::Validation(format!(
            "Expected a {} ID, got: {}",
            table, id
        )));
    }
    Ok(rid)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Current time as an RFC3339 UTC string (stored timestamps)
pub(crate) fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
