//! User (profile) database operations

use mcm_common::db::User;
use mcm_common::error::map_unique_violation;
use mcm_common::validation::validate_user_name;
use mcm_common::Result;
use sqlx::SqlitePool;
use tracing::info;

/// Profiles are an id + name pair; there is no update or delete path.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All profiles, oldest first
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Create a profile and return its id
    ///
    /// # Errors
    /// - `InvalidInput` for a blank name
    /// - `Duplicate` when the name is taken (nothing is inserted)
    pub async fn create(&self, name: &str) -> Result<i64> {
        let name = validate_user_name(name)?;

        let result = sqlx::query("INSERT INTO users (name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| map_unique_violation(e, format!("user '{}'", name)))?;

        let id = result.last_insert_rowid();
        info!(user_id = id, name = %name, "Created user");
        Ok(id)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE name = ?")
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
