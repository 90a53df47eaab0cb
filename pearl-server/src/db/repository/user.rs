//! User Repository

use super::{BaseRepository, RepoError, RepoResult, now_rfc3339, parse_record_id};
use crate::db::models::{User, UserCreate, UserUpdate};
use serde::Serialize;
use shared::Role;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find user by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let user: Option<User> = self.base.db().select(id.clone()).await?;
        Ok(user)
    }

    /// Find user by id string ("user:xxx")
    pub async fn find_by_id_str(&self, id: &str) -> RepoResult<Option<User>> {
        let rid = parse_record_id(id, TABLE)?;
        self.find_by_id(&rid).await
    }

    /// Find active users with a given role
    pub async fn find_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE role = $role AND is_active = true")
            .bind(("role", role))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Create a user
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with email '{}' already exists",
                data.email
            )));
        }

        let user = User {
            id: None,
            name: data.name,
            email: data.email,
            phone: data.phone,
            role: data.role,
            cart: None,
            is_active: true,
            created_at: Some(now_rfc3339()),
        };

        let created: Option<User> = self.base.db().create(TABLE).content(user).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    /// Find user by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let user: Option<User> = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(user)
    }

    /// Update profile fields
    pub async fn update(&self, id: &RecordId, data: UserUpdate) -> RepoResult<User> {
        let updated: Option<User> = self.base.db().update(id.clone()).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }

    /// Point the user at their active cart (or clear the pointer)
    pub async fn set_cart(&self, id: &RecordId, cart: Option<RecordId>) -> RepoResult<User> {
        #[derive(Serialize)]
        struct CartPointer {
            cart: Option<String>,
        }
        let updated: Option<User> = self
            .base
            .db()
            .update(id.clone())
            .merge(CartPointer {
                cart: cart.map(|c| c.to_string()),
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("User {} not found", id)))
    }
}
