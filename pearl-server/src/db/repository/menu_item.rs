//! Menu Item Repository

use super::{BaseRepository, RepoError, RepoResult, Repository, now_rfc3339, parse_record_id};
use crate::db::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "menu_item";

#[derive(Clone)]
pub struct MenuItemRepository {
    base: BaseRepository,
}

impl MenuItemRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Batched lookup by id set (one round trip)
    ///
    /// 定价解析器的唯一读路径：缺失的 id 直接不出现在结果里。
    pub async fn find_by_ids(&self, ids: &[RecordId]) -> RepoResult<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        // SELECT FROM an id array: 不存在的 id 直接缺席结果集
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM $ids")
            .bind(("ids", ids.to_vec()))
            .await?
            .take(0)?;
        Ok(items)
    }

    /// Find by exact name (unique within the catalog)
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<MenuItem>> {
        let item: Option<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item WHERE name = $name LIMIT 1")
            .bind(("name", name.to_string()))
            .await?
            .take(0)?;
        Ok(item)
    }
}

impl Repository<MenuItem, MenuItemCreate, MenuItemUpdate> for MenuItemRepository {
    async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let items: Vec<MenuItem> = self
            .base
            .db()
            .query("SELECT * FROM menu_item ORDER BY name")
            .await?
            .take(0)?;
        Ok(items)
    }

    async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        let rid = parse_record_id(id, TABLE)?;
        let item: Option<MenuItem> = self.base.db().select(rid).await?;
        Ok(item)
    }

    async fn create(&self, data: MenuItemCreate) -> RepoResult<MenuItem> {
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                data.name
            )));
        }

        let item = MenuItem {
            id: None,
            name: data.name,
            description: data.description,
            price: data.price,
            category: data.category,
            is_available: data.is_available.unwrap_or(true),
            created_at: Some(now_rfc3339()),
            updated_at: Some(now_rfc3339()),
        };

        let created: Option<MenuItem> = self.base.db().create(TABLE).content(item).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create menu item".to_string()))
    }

    async fn update(&self, id: &str, data: MenuItemUpdate) -> RepoResult<MenuItem> {
        let rid = parse_record_id(id, TABLE)?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))?;

        // Duplicate name check when renaming
        if let Some(name) = &data.name
            && let Some(found) = self.find_by_name(name).await?
            && found.id != existing.id
        {
            return Err(RepoError::Duplicate(format!(
                "Menu item '{}' already exists",
                name
            )));
        }

        #[derive(serde::Serialize)]
        struct Patch {
            #[serde(flatten)]
            data: MenuItemUpdate,
            updated_at: String,
        }

        let updated: Option<MenuItem> = self
            .base
            .db()
            .update(rid)
            .merge(Patch {
                data,
                updated_at: now_rfc3339(),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", id)))
    }

    async fn delete(&self, id: &str) -> RepoResult<bool> {
        let rid = parse_record_id(id, TABLE)?;
        let deleted: Option<MenuItem> = self.base.db().delete(rid).await?;
        Ok(deleted.is_some())
    }
}
