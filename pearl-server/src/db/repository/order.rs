//! Order Repository
//!
//! 订单没有 delete：历史订单是审计痕迹。

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, parse_record_id};
use crate::db::models::Order;
use shared::{OrderStatus, PaymentStatus};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

// "order" 是 SurrealQL 关键字，表名避开它
const TABLE: &str = "customer_order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a fully-built order (status/total already decided by the engine)
    pub async fn insert(&self, order: Order) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(TABLE).content(order).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Order>> {
        let order: Option<Order> = self.base.db().select(id.clone()).await?;
        Ok(order)
    }

    pub async fn find_by_id_str(&self, id: &str) -> RepoResult<Option<Order>> {
        let rid = parse_record_id(id, TABLE)?;
        self.find_by_id(&rid).await
    }

    /// All orders for one customer, newest first
    pub async fn find_by_customer(&self, customer: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM customer_order WHERE customer_id = $customer ORDER BY created_at DESC",
            )
            .bind(("customer", customer.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM customer_order ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Update whichever of the two status axes is provided
    pub async fn set_status(
        &self,
        id: &RecordId,
        status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
    ) -> RepoResult<Order> {
        #[derive(serde::Serialize)]
        struct Patch {
            #[serde(skip_serializing_if = "Option::is_none")]
            status: Option<OrderStatus>,
            #[serde(skip_serializing_if = "Option::is_none")]
            payment_status: Option<PaymentStatus>,
            updated_at: String,
        }

        let updated: Option<Order> = self
            .base
            .db()
            .update(id.clone())
            .merge(Patch {
                status,
                payment_status,
                updated_at: now_rfc3339(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
