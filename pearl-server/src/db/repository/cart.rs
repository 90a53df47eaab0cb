//! Cart Repository
//!
//! 购物车的条目与派生总价总是作为一次合并写入持久化，
//! 不提供单独更新 total_price 的入口。

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, parse_record_id};
use crate::db::models::{Cart, CartItem, CartItemsUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "cart";

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find cart by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Cart>> {
        let cart: Option<Cart> = self.base.db().select(id.clone()).await?;
        Ok(cart)
    }

    /// Find cart by id string ("cart:xxx")
    pub async fn find_by_id_str(&self, id: &str) -> RepoResult<Option<Cart>> {
        let rid = parse_record_id(id, TABLE)?;
        self.find_by_id(&rid).await
    }

    /// Find the active cart owned by a customer
    pub async fn find_by_owner(&self, customer: &RecordId) -> RepoResult<Option<Cart>> {
        let cart: Option<Cart> = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE customer_id = $customer LIMIT 1")
            .bind(("customer", customer.to_string()))
            .await?
            .take(0)?;
        Ok(cart)
    }

    /// Create an empty cart, optionally owned
    pub async fn create(&self, customer_id: Option<RecordId>) -> RepoResult<Cart> {
        let cart = Cart {
            id: None,
            customer_id,
            items: vec![],
            total_price: 0.0,
            created_at: Some(now_rfc3339()),
            updated_at: Some(now_rfc3339()),
        };

        let created: Option<Cart> = self.base.db().create(TABLE).content(cart).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create cart".to_string()))
    }

    /// Persist a new items list together with its recomputed total
    pub async fn set_items(
        &self,
        id: &RecordId,
        items: Vec<CartItem>,
        total_price: f64,
    ) -> RepoResult<Cart> {
        let updated: Option<Cart> = self
            .base
            .db()
            .update(id.clone())
            .merge(CartItemsUpdate {
                items,
                total_price,
                updated_at: now_rfc3339(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Cart {} not found", id)))
    }
}
