//! Repository for the `fundings` table.

use sqlx::PgPool;

use crate::models::funding::{CreateFunding, Funding};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, donor_email, donor_name, amount_cents, currency, transaction_id, created_at";

/// Provides insert and reporting queries for the funding ledger.
pub struct FundingRepo;

impl FundingRepo {
    /// Record a completed payment, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateFunding) -> Result<Funding, sqlx::Error> {
        let query = format!(
            "INSERT INTO fundings (donor_email, donor_name, amount_cents, currency, transaction_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Funding>(&query)
            .bind(&input.donor_email)
            .bind(&input.donor_name)
            .bind(input.amount_cents)
            .bind(&input.currency)
            .bind(&input.transaction_id)
            .fetch_one(pool)
            .await
    }

    /// List payments, newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Funding>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM fundings
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Funding>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM fundings")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Sum of every recorded amount, in the smallest currency unit.
    pub async fn total(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COALESCE(SUM(amount_cents), 0)::BIGINT FROM fundings")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
