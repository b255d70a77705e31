//! Repository for the `accounts` table.

use sqlx::PgPool;
use vitalflow_core::types::DbId;

use crate::models::account::{Account, CreateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, display_name, photo_url, \
                       last_login_at, created_at, updated_at";

/// Provides CRUD operations for identity accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts (email, password_hash, display_name, photo_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.display_name)
            .bind(&input.photo_url)
            .fetch_one(pool)
            .await
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by (normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE email = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Set `last_login_at` to now.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE accounts SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Keep the identity display name and photo in step with profile edits.
    pub async fn update_identity(
        pool: &PgPool,
        email: &str,
        display_name: Option<&str>,
        photo_url: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET
                display_name = COALESCE($2, display_name),
                photo_url = COALESCE($3, photo_url)
             WHERE email = $1",
        )
        .bind(email)
        .bind(display_name)
        .bind(photo_url)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Hard-delete an account. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
