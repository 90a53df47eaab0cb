//! Cart Engine
//!
//! 条目按 menu_item 唯一；重复添加是数量自增。每次变更都通过定价
//! 解析器重算 `total_price` 并与条目一起落库。
//!
//! 并发模型：last-writer-wins，没有乐观并发令牌。单用户购物车下
//! 可接受；并发写会丢更新，这是已知限制而非缺陷修复点。

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

use crate::db::models::{Cart, CartItem};
use crate::db::repository::{
    CartRepository, MenuItemRepository, Repository, UserRepository, parse_record_id,
};
use crate::pricing::{LineRequest, MissingItemPolicy, PricingResolver, money};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct CartEngine {
    carts: CartRepository,
    users: UserRepository,
    menu: MenuItemRepository,
    resolver: PricingResolver,
}

impl CartEngine {
    pub fn new(db: Surreal<Db>, policy: MissingItemPolicy) -> Self {
        Self {
            carts: CartRepository::new(db.clone()),
            users: UserRepository::new(db.clone()),
            menu: MenuItemRepository::new(db.clone()),
            resolver: PricingResolver::new(db, policy),
        }
    }

    /// Create an empty cart; when owned, the user record is pointed at it
    ///
    /// 每用户至多一个活动购物车（引擎级检查）。
    pub async fn create_cart(&self, owner: Option<RecordId>) -> AppResult<Cart> {
        if let Some(owner_id) = &owner {
            let user = self
                .users
                .find_by_id(owner_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", owner_id)))?;

            if user.cart.is_some() || self.carts.find_by_owner(owner_id).await?.is_some() {
                return Err(AppError::Conflict(format!(
                    "User {} already has an active cart",
                    owner_id
                )));
            }
        }

        let cart = self.carts.create(owner.clone()).await?;

        if let Some(owner_id) = &owner {
            self.users
                .set_cart(owner_id, cart.id.clone())
                .await
                .map_err(AppError::from)?;
        }

        Ok(cart)
    }

    pub async fn get_cart(&self, cart_id: &str) -> AppResult<Cart> {
        self.load(cart_id).await
    }

    /// Add a menu item; an existing line has its quantity incremented
    pub async fn add_item(
        &self,
        cart_id: &str,
        menu_item_id: &str,
        quantity: Option<i32>,
    ) -> AppResult<Cart> {
        let cart = self.load(cart_id).await?;

        let menu_rid = parse_record_id(menu_item_id, "menu_item").map_err(AppError::from)?;
        self.menu
            .find_by_id(menu_item_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Menu item {} not found", menu_item_id)))?;

        let add = quantity.filter(|q| *q >= 1).unwrap_or(1);
        let items = upsert_quantity(cart.items, &menu_rid, add)?;
        self.persist(cart.id, items).await
    }

    /// Remove a line; removing an absent line is not an error
    pub async fn remove_item(&self, cart_id: &str, menu_item_id: &str) -> AppResult<Cart> {
        let cart = self.load(cart_id).await?;
        let menu_rid = parse_record_id(menu_item_id, "menu_item").map_err(AppError::from)?;
        let items = remove_line(cart.items, &menu_rid);
        self.persist(cart.id, items).await
    }

    /// Set a line's quantity; non-positive quantities remove the line
    pub async fn update_item_quantity(
        &self,
        cart_id: &str,
        menu_item_id: &str,
        quantity: i32,
    ) -> AppResult<Cart> {
        let cart = self.load(cart_id).await?;
        let menu_rid = parse_record_id(menu_item_id, "menu_item").map_err(AppError::from)?;

        let items = set_quantity(cart.items, &menu_rid, quantity)?.ok_or_else(|| {
            AppError::NotFound(format!("Item {} is not in the cart", menu_item_id))
        })?;
        self.persist(cart.id, items).await
    }

    /// Drop all lines and reset the total to zero
    pub async fn empty_cart(&self, cart_id: &str) -> AppResult<Cart> {
        let cart = self.load(cart_id).await?;
        self.persist(cart.id, vec![]).await
    }

    async fn load(&self, cart_id: &str) -> AppResult<Cart> {
        self.carts
            .find_by_id_str(cart_id)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::NotFound(format!("Cart {} not found", cart_id)))
    }

    /// Recompute the derived total and write items+total together
    async fn persist(&self, cart_id: Option<RecordId>, items: Vec<CartItem>) -> AppResult<Cart> {
        let id = cart_id.ok_or_else(|| AppError::Internal("Loaded cart has no id".into()))?;
        let total = self.resolver.resolve_total(&line_requests(&items)).await?;
        self.carts
            .set_items(&id, items, total)
            .await
            .map_err(AppError::from)
    }
}

/// Cart lines as pricing requests
pub(crate) fn line_requests(items: &[CartItem]) -> Vec<LineRequest> {
    items
        .iter()
        .map(|item| LineRequest {
            menu_item: item.menu_item.clone(),
            quantity: Some(item.quantity),
        })
        .collect()
}

/// Increment an existing line or append a new one
fn upsert_quantity(
    mut items: Vec<CartItem>,
    menu_item: &RecordId,
    add: i32,
) -> AppResult<Vec<CartItem>> {
    match items.iter_mut().find(|i| &i.menu_item == menu_item) {
        Some(line) => {
            let next = line.quantity.saturating_add(add);
            if next > money::MAX_QUANTITY {
                return Err(AppError::Validation(format!(
                    "Quantity exceeds maximum allowed ({})",
                    money::MAX_QUANTITY
                )));
            }
            line.quantity = next;
        }
        None => {
            if add > money::MAX_QUANTITY {
                return Err(AppError::Validation(format!(
                    "Quantity exceeds maximum allowed ({})",
                    money::MAX_QUANTITY
                )));
            }
            items.push(CartItem {
                menu_item: menu_item.clone(),
                quantity: add,
            });
        }
    }
    Ok(items)
}

/// Filter a line out (no-op when absent)
fn remove_line(items: Vec<CartItem>, menu_item: &RecordId) -> Vec<CartItem> {
    items
        .into_iter()
        .filter(|i| &i.menu_item != menu_item)
        .collect()
}

/// Set a line's quantity; None when the line is absent.
/// A non-positive quantity removes the line — the stored list never
/// contains a quantity below 1.
fn set_quantity(
    items: Vec<CartItem>,
    menu_item: &RecordId,
    quantity: i32,
) -> AppResult<Option<Vec<CartItem>>> {
    if !items.iter().any(|i| &i.menu_item == menu_item) {
        return Ok(None);
    }
    if quantity <= 0 {
        return Ok(Some(remove_line(items, menu_item)));
    }
    if quantity > money::MAX_QUANTITY {
        return Err(AppError::Validation(format!(
            "Quantity exceeds maximum allowed ({})",
            money::MAX_QUANTITY
        )));
    }
    let items = items
        .into_iter()
        .map(|mut i| {
            if &i.menu_item == menu_item {
                i.quantity = quantity;
            }
            i
        })
        .collect();
    Ok(Some(items))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rid(key: &str) -> RecordId {
        RecordId::from_table_key("menu_item", key)
    }

    fn line(key: &str, quantity: i32) -> CartItem {
        CartItem {
            menu_item: rid(key),
            quantity,
        }
    }

    #[test]
    fn test_add_existing_increments() {
        let items = upsert_quantity(vec![line("soup", 2)], &rid("soup"), 3).unwrap();
        assert_eq!(items, vec![line("soup", 5)]);
    }

    #[test]
    fn test_add_new_appends() {
        let items = upsert_quantity(vec![line("soup", 2)], &rid("bread"), 1).unwrap();
        assert_eq!(items, vec![line("soup", 2), line("bread", 1)]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let items = remove_line(vec![line("soup", 2)], &rid("ghost"));
        assert_eq!(items, vec![line("soup", 2)]);
        let items = remove_line(items, &rid("soup"));
        assert!(items.is_empty());
    }

    #[test]
    fn test_quantity_floor_removes_line() {
        let items = set_quantity(vec![line("soup", 2)], &rid("soup"), 0)
            .unwrap()
            .unwrap();
        assert!(items.is_empty());

        let items = set_quantity(vec![line("soup", 2)], &rid("soup"), -4)
            .unwrap()
            .unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_set_quantity_missing_line() {
        let result = set_quantity(vec![line("soup", 2)], &rid("ghost"), 3).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_quantity_cap() {
        assert!(upsert_quantity(vec![], &rid("soup"), money::MAX_QUANTITY + 1).is_err());
        assert!(set_quantity(vec![line("soup", 1)], &rid("soup"), money::MAX_QUANTITY + 1).is_err());
    }
}
