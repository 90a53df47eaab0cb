//! Pricing Resolver
//!
//! 给定 (menu_item, quantity) 列表，一次批量读取当前菜单价并计算合计。
//! 没有副作用；购物车重算与订单快照都走这里。
//!
//! 引用了不存在菜品的条目按 [`MissingItemPolicy`] 处理——这是唯一的
//! 切换点，默认按 0 计价（沿用既有行为），严格模式下整单拒绝。

use std::collections::HashMap;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use surrealdb::RecordId;

use crate::db::repository::MenuItemRepository;
use crate::pricing::money;
use crate::utils::{AppError, AppResult};

/// Policy for line items whose menu item no longer exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingItemPolicy {
    /// Price the line at 0 and keep going (observed legacy behavior)
    #[default]
    PriceAsZero,
    /// Fail the whole resolution with NotFound
    Reject,
}

/// One requested line before resolution
#[derive(Debug, Clone)]
pub struct LineRequest {
    pub menu_item: RecordId,
    /// Absent or non-positive quantities are coerced to 1
    pub quantity: Option<i32>,
}

/// One priced line after resolution
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub menu_item: RecordId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i32,
    pub line_total: f64,
}

/// Full resolution result
#[derive(Debug, Clone, Default)]
pub struct PricedOrder {
    pub lines: Vec<PricedLine>,
    pub total: f64,
}

/// Pricing Resolver - current-price lookup and total computation
#[derive(Clone)]
pub struct PricingResolver {
    menu_repo: MenuItemRepository,
    policy: MissingItemPolicy,
}

impl PricingResolver {
    pub fn new(db: Surreal<Db>, policy: MissingItemPolicy) -> Self {
        Self {
            menu_repo: MenuItemRepository::new(db),
            policy,
        }
    }

    /// Resolve all lines against the current catalog
    pub async fn resolve(&self, items: &[LineRequest]) -> AppResult<PricedOrder> {
        let merged = merge_requests(items);
        if merged.is_empty() {
            return Ok(PricedOrder::default());
        }

        let ids: Vec<RecordId> = merged.iter().map(|(id, _)| id.clone()).collect();
        let found = self.menu_repo.find_by_ids(&ids).await?;

        let mut price_map: HashMap<String, (String, f64)> = HashMap::with_capacity(found.len());
        for item in found {
            let Some(id) = &item.id else { continue };
            money::validate_unit_price(item.price, &item.name)?;
            price_map.insert(id.to_string(), (item.name, item.price));
        }

        price_lines(merged, &price_map, self.policy)
    }

    /// Resolve and return only the total
    pub async fn resolve_total(&self, items: &[LineRequest]) -> AppResult<f64> {
        Ok(self.resolve(items).await?.total)
    }
}

/// Coerce a requested quantity to a positive integer (default 1)
fn normalize_quantity(quantity: Option<i32>) -> i32 {
    match quantity {
        Some(q) if q >= 1 => q,
        _ => 1,
    }
}

/// Collapse duplicate menu item references, summing quantities.
/// First-seen order is preserved.
fn merge_requests(items: &[LineRequest]) -> Vec<(RecordId, i32)> {
    let mut merged: Vec<(RecordId, i32)> = Vec::with_capacity(items.len());
    for req in items {
        let quantity = normalize_quantity(req.quantity);
        match merged.iter_mut().find(|(id, _)| *id == req.menu_item) {
            Some((_, q)) => *q = q.saturating_add(quantity),
            None => merged.push((req.menu_item.clone(), quantity)),
        }
    }
    merged
}

/// Pure pricing step over a prefetched price map
fn price_lines(
    merged: Vec<(RecordId, i32)>,
    price_map: &HashMap<String, (String, f64)>,
    policy: MissingItemPolicy,
) -> AppResult<PricedOrder> {
    let mut missing: Vec<String> = vec![];
    let mut lines: Vec<PricedLine> = Vec::with_capacity(merged.len());

    for (menu_item, quantity) in merged {
        let key = menu_item.to_string();
        let (name, unit_price) = match price_map.get(&key) {
            Some((name, price)) => (name.clone(), *price),
            None => {
                missing.push(key.clone());
                // Priced at zero; the name falls back to the raw reference
                (key, 0.0)
            }
        };
        let line_total = money::line_total(unit_price, quantity);
        lines.push(PricedLine {
            menu_item,
            name,
            unit_price,
            quantity,
            line_total,
        });
    }

    if policy == MissingItemPolicy::Reject && !missing.is_empty() {
        return Err(AppError::NotFound(format!(
            "Menu items no longer exist: {}",
            missing.join(", ")
        )));
    }

    let total = money::to_f64(
        lines
            .iter()
            .map(|l| money::to_decimal(l.line_total))
            .sum::<rust_decimal::Decimal>(),
    );

    Ok(PricedOrder { lines, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rid(key: &str) -> RecordId {
        RecordId::from_table_key("menu_item", key)
    }

    fn req(key: &str, quantity: Option<i32>) -> LineRequest {
        LineRequest {
            menu_item: rid(key),
            quantity,
        }
    }

    fn make_price_map(entries: &[(&str, &str, f64)]) -> HashMap<String, (String, f64)> {
        entries
            .iter()
            .map(|(key, name, price)| {
                (rid(key).to_string(), (name.to_string(), *price))
            })
            .collect()
    }

    #[test]
    fn test_quantity_coercion() {
        assert_eq!(normalize_quantity(None), 1);
        assert_eq!(normalize_quantity(Some(0)), 1);
        assert_eq!(normalize_quantity(Some(-3)), 1);
        assert_eq!(normalize_quantity(Some(4)), 4);
    }

    #[test]
    fn test_merge_duplicates() {
        let merged = merge_requests(&[
            req("soup", Some(2)),
            req("bread", None),
            req("soup", Some(1)),
        ]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], (rid("soup"), 3));
        assert_eq!(merged[1], (rid("bread"), 1));
    }

    #[test]
    fn test_total_over_known_items() {
        let prices = make_price_map(&[("soup", "Soup", 10.0), ("steak", "Steak", 15.0)]);
        let merged = vec![(rid("soup"), 2), (rid("steak"), 1)];
        let priced = price_lines(merged, &prices, MissingItemPolicy::PriceAsZero).unwrap();
        assert_eq!(priced.total, 35.0);
        assert_eq!(priced.lines[0].line_total, 20.0);
        assert_eq!(priced.lines[1].line_total, 15.0);
    }

    #[test]
    fn test_missing_item_priced_as_zero() {
        let prices = make_price_map(&[("soup", "Soup", 10.0)]);
        let merged = vec![(rid("soup"), 1), (rid("ghost"), 2)];
        let priced = price_lines(merged, &prices, MissingItemPolicy::PriceAsZero).unwrap();
        assert_eq!(priced.total, 10.0);
        assert_eq!(priced.lines[1].unit_price, 0.0);
    }

    #[test]
    fn test_missing_item_rejected_in_strict_mode() {
        let prices = make_price_map(&[("soup", "Soup", 10.0)]);
        let merged = vec![(rid("soup"), 1), (rid("ghost"), 2)];
        let err = price_lines(merged, &prices, MissingItemPolicy::Reject);
        assert!(matches!(err, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_empty_input_totals_zero() {
        let priced = price_lines(vec![], &HashMap::new(), MissingItemPolicy::Reject).unwrap();
        assert!(priced.lines.is_empty());
        assert_eq!(priced.total, 0.0);
    }
}
