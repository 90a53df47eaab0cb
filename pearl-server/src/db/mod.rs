//! Database Module
//!
//! 嵌入式 SurrealDB：生产环境 RocksDB 落盘，测试用内存引擎。
//! 启动时定义唯一索引（菜品名、桌号）。

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "pearl";
const DATABASE: &str = "main";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database under `work_dir`
    pub async fn connect(work_dir: &str) -> Result<Self, AppError> {
        let path = std::path::Path::new(work_dir).join("data");
        let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to open database: {e}")))?;
        Self::setup(db).await
    }

    /// In-process memory database (test suites)
    pub async fn connect_memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::Database(format!("Failed to open memory database: {e}")))?;
        Self::setup(db).await
    }

    async fn setup(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::Database(format!("Failed to select namespace: {e}")))?;

        define_indexes(&db).await?;

        tracing::info!("Database ready (ns={}, db={})", NAMESPACE, DATABASE);
        Ok(Self { db })
    }
}

/// Uniqueness constraints enforced by the store
///
/// 预订时段的不重叠约束无法用索引表达，由可用性引擎在应用层保证。
async fn define_indexes(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query("DEFINE INDEX IF NOT EXISTS idx_menu_item_name ON TABLE menu_item COLUMNS name UNIQUE")
        .query("DEFINE INDEX IF NOT EXISTS idx_table_number ON TABLE dining_table COLUMNS table_number UNIQUE")
        .query("DEFINE INDEX IF NOT EXISTS idx_user_email ON TABLE user COLUMNS email UNIQUE")
        .await
        .map_err(|e| AppError::Database(format!("Failed to define indexes: {e}")))?;
    Ok(())
}
