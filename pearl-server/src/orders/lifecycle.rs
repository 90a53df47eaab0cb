//! Order Lifecycle
//!
//! 创建是两阶段的：第一阶段落库订单（含价格快照与审计），
//! 第二阶段清空来源购物车——清空失败只记日志，订单不回滚。
//! 崩在两步之间会留下一个过期购物车，这是记录在案的可接受限制。

use shared::{LogKind, LogSeverity, OrderStatus, Role};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

use crate::auth::{CurrentUser, require_role};
use crate::db::models::{Order, OrderCreate, OrderItem, OrderStatusUpdate};
use crate::db::repository::{
    CartRepository, OrderRepository, UserRepository, now_rfc3339, parse_record_id,
};
use crate::pricing::{LineRequest, MissingItemPolicy, PricedOrder, PricingResolver};
use crate::services::AuditService;
use crate::utils::{AppError, AppResult, validation};

const STAFF: &[Role] = &[Role::Admin, Role::Manager];

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    carts: CartRepository,
    users: UserRepository,
    resolver: PricingResolver,
    audit: AuditService,
    /// Opt-in transition allow-list (off preserves the permissive legacy behavior)
    enforce_transitions: bool,
}

impl OrderService {
    pub fn new(
        db: Surreal<Db>,
        policy: MissingItemPolicy,
        enforce_transitions: bool,
        audit: AuditService,
    ) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            carts: CartRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            resolver: PricingResolver::new(db, policy),
            audit,
            enforce_transitions,
        }
    }

    /// Create an order from explicit items or from the customer's cart
    pub async fn create_order(&self, payload: OrderCreate) -> AppResult<Order> {
        if payload.customer_id.trim().is_empty() {
            return Err(AppError::Validation("customer_id is required".to_string()));
        }
        validation::validate_optional_text(
            &payload.customer_notes,
            "customer_notes",
            validation::MAX_NOTE_LEN,
        )?;

        let customer_rid = parse_record_id(&payload.customer_id, "user")?;
        let customer = self.users.find_by_id(&customer_rid).await?;

        // Item source: explicit list, or the customer's active cart
        let explicit = payload.items.as_ref().filter(|items| !items.is_empty());
        let (requests, source_cart): (Vec<LineRequest>, Option<RecordId>) = match explicit {
            Some(items) => (
                items
                    .iter()
                    .map(|i| LineRequest {
                        menu_item: i.menu_item.clone(),
                        quantity: i.quantity,
                    })
                    .collect(),
                None,
            ),
            None => {
                let cart = self
                    .carts
                    .find_by_owner(&customer_rid)
                    .await?
                    .ok_or_else(|| {
                        AppError::Validation(format!(
                            "Customer {} has no cart",
                            payload.customer_id
                        ))
                    })?;
                if cart.is_empty() {
                    return Err(AppError::Validation("Cart is empty".to_string()));
                }
                (crate::cart::engine::line_requests(&cart.items), cart.id)
            }
        };

        if requests.is_empty() {
            return Err(AppError::Validation("Order has no items".to_string()));
        }

        // Price snapshot point: the stored total is never recomputed
        let priced = self.resolver.resolve(&requests).await?;

        let customer_name = match payload.customer_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => customer
                .map(|u| u.name)
                .ok_or_else(|| {
                    AppError::NotFound(format!("User {} not found", payload.customer_id))
                })?,
        };

        let order = Order {
            id: None,
            customer_id: customer_rid.clone(),
            customer_name,
            items: snapshot_lines(&priced),
            order_type: payload.order_type.unwrap_or_default(),
            status: OrderStatus::Pending,
            payment_status: payload.payment_status.unwrap_or_default(),
            total_price: priced.total,
            customer_notes: payload.customer_notes,
            created_at: Some(now_rfc3339()),
            updated_at: Some(now_rfc3339()),
        };

        let created = self.orders.insert(order).await?;

        self.audit.record(
            "order.create",
            format!(
                "Order of {} items, total {:.2}",
                created.items.len(),
                created.total_price
            ),
            LogSeverity::Info,
            LogKind::Order,
            Some(customer_rid.clone()),
            created.id.as_ref(),
        );

        // Phase 2: drain the source cart. Best-effort — the order stands
        // even if this write fails.
        if let Some(cart_id) = source_cart {
            if let Err(e) = self.carts.set_items(&cart_id, vec![], 0.0).await {
                tracing::warn!(
                    target: "orders",
                    cart = %cart_id,
                    error = %e,
                    "Failed to empty cart after order creation"
                );
                self.audit.record(
                    "cart.empty_failed",
                    format!("Cart {} left stale after order creation", cart_id),
                    LogSeverity::Warning,
                    LogKind::Cart,
                    Some(customer_rid),
                    Some(&cart_id),
                );
            }
        }

        Ok(created)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Order> {
        self.orders
            .find_by_id_str(id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))
    }

    pub async fn get_by_customer(&self, customer_id: &str) -> AppResult<Vec<Order>> {
        let rid = parse_record_id(customer_id, "user")?;
        Ok(self.orders.find_by_customer(&rid).await?)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Order>> {
        Ok(self.orders.find_all().await?)
    }

    /// Staff-only update of either status axis
    pub async fn update_status(
        &self,
        id: &str,
        update: OrderStatusUpdate,
        acting: &CurrentUser,
    ) -> AppResult<Order> {
        require_role(acting, STAFF)?;

        if update.status.is_none() && update.payment_status.is_none() {
            return Err(AppError::Validation(
                "Provide status or payment_status".to_string(),
            ));
        }

        let existing = self.get_by_id(id).await?;

        if self.enforce_transitions
            && let Some(next) = update.status
            && !transition_allowed(existing.status, next)
        {
            return Err(AppError::Conflict(format!(
                "Transition {} -> {} is not allowed",
                existing.status, next
            )));
        }

        let rid = existing
            .id
            .clone()
            .ok_or_else(|| AppError::Internal("Loaded order has no id".into()))?;
        let updated = self
            .orders
            .set_status(&rid, update.status, update.payment_status)
            .await?;

        self.audit.record(
            "order.status",
            format!(
                "Status {} -> {}, payment {} -> {}",
                existing.status, updated.status, existing.payment_status, updated.payment_status
            ),
            LogSeverity::Info,
            LogKind::Order,
            Some(acting.id.clone()),
            Some(&rid),
        );

        Ok(updated)
    }
}

/// Priced lines frozen into order items
fn snapshot_lines(priced: &PricedOrder) -> Vec<OrderItem> {
    priced
        .lines
        .iter()
        .map(|line| OrderItem {
            menu_item: line.menu_item.clone(),
            name: line.name.clone(),
            unit_price: line.unit_price,
            quantity: line.quantity,
            line_total: line.line_total,
        })
        .collect()
}

/// Opt-in allow-list: Pending -> {Accepted, InProgress, Cancelled} -> Completed
fn transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    if from == to {
        return true;
    }
    matches!(
        (from, to),
        (Pending, Accepted)
            | (Pending, InProgress)
            | (Pending, Cancelled)
            | (Accepted, InProgress)
            | (Accepted, Completed)
            | (Accepted, Cancelled)
            | (InProgress, Completed)
            | (InProgress, Cancelled)
    )
}
