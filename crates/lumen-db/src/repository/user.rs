//! # User Repository
//!
//! Database operations for the staff roster.
//!
//! A roster, not an auth system: rows carry a name and a role label and
//! nothing else. Users are hard-deleted since nothing references them.

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use lumen_core::{Role, User};

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists all users sorted by name.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, role FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    /// Gets a user by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, role FROM users WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Inserts a new user and returns the stored record.
    pub async fn insert(&self, name: &str, role: Role) -> DbResult<User> {
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            role,
        };

        debug!(id = %user.id, name = %user.name, role = %user.role, "Inserting user");

        sqlx::query("INSERT INTO users (id, name, role) VALUES (?1, ?2, ?3)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(user.role)
            .execute(&self.pool)
            .await?;

        Ok(user)
    }

    /// Deletes a user.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_list_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let admin = repo.insert("Sara", Role::Admin).await.unwrap();
        repo.insert("Tariq", Role::Cashier).await.unwrap();

        let users = repo.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Sara");
        assert_eq!(users[0].role, Role::Admin);

        repo.delete(&admin.id).await.unwrap();
        assert_eq!(repo.list().await.unwrap().len(), 1);

        assert!(repo.delete(&admin.id).await.is_err());
    }
}
