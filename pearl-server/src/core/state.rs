//! 服务器状态 - 持有数据库句柄与共享服务
//!
//! ServerState 以 Arc 浅拷贝在请求间共享；引擎对象按请求构造，
//! 构造成本只是几个 Surreal 句柄克隆。

use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::cart::CartEngine;
use crate::core::Config;
use crate::db::DbService;
use crate::orders::OrderService;
use crate::reservations::{AvailabilityEngine, ReservationEngine};
use crate::services::{AuditService, LogConfirmationSender, NotificationService};
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: Surreal<Db>,
    pub audit: AuditService,
    pub notifier: Arc<NotificationService>,
}

impl ServerState {
    /// Open the on-disk database and wire up services
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db_service = DbService::connect(&config.work_dir).await?;
        Ok(Self::with_db(config.clone(), db_service.db))
    }

    /// Wire services over an existing database handle (also used by tests)
    pub fn with_db(config: Config, db: Surreal<Db>) -> Self {
        let audit = AuditService::new(db.clone());
        let notifier = Arc::new(NotificationService::new(
            db.clone(),
            Arc::new(LogConfirmationSender),
        ));
        Self {
            config: Arc::new(config),
            db,
            audit,
            notifier,
        }
    }

    // === 按请求构造的引擎 ===

    pub fn cart_engine(&self) -> CartEngine {
        CartEngine::new(self.db.clone(), self.config.missing_item_policy())
    }

    pub fn order_service(&self) -> OrderService {
        OrderService::new(
            self.db.clone(),
            self.config.missing_item_policy(),
            self.config.enforce_order_transitions,
            self.audit.clone(),
        )
    }

    pub fn availability_engine(&self) -> AvailabilityEngine {
        AvailabilityEngine::new(self.db.clone())
    }

    pub fn reservation_engine(&self) -> ReservationEngine {
        ReservationEngine::new(
            self.db.clone(),
            self.audit.clone(),
            Arc::clone(&self.notifier),
        )
    }
}
