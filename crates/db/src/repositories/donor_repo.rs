//! Repository for the `donors` table.

use sqlx::PgPool;
use vitalflow_core::roles::{AccountStatus, Role};

use crate::models::donor::{CreateDonor, Donor, DonorSearch, UpdateDonor};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, name, avatar_url, blood_group, district, upazila, \
                       role, status, created_at, updated_at";

/// Cap on rows returned by the public donor search.
const SEARCH_LIMIT: i64 = 100;

/// Provides CRUD operations for donor profiles.
pub struct DonorRepo;

impl DonorRepo {
    /// Insert a new donor profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDonor) -> Result<Donor, sqlx::Error> {
        let query = format!(
            "INSERT INTO donors (email, name, avatar_url, blood_group, district, upazila)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.avatar_url)
            .bind(input.blood_group.as_str())
            .bind(&input.district)
            .bind(&input.upazila)
            .fetch_one(pool)
            .await
    }

    /// Find a donor by (normalized) email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donors WHERE email = $1");
        sqlx::query_as::<_, Donor>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List donors, newest first, optionally filtered by account status.
    pub async fn list(
        pool: &PgPool,
        status: Option<AccountStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Donor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donors
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(status.map(AccountStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count donors matching the same filter as [`DonorRepo::list`].
    pub async fn count(pool: &PgPool, status: Option<AccountStatus>) -> Result<i64, sqlx::Error> {
        let row: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM donors WHERE ($1::TEXT IS NULL OR status = $1)")
                .bind(status.map(AccountStatus::as_str))
                .fetch_one(pool)
                .await?;
        Ok(row.0)
    }

    /// Active donors matching every provided filter.
    pub async fn search(pool: &PgPool, filter: &DonorSearch) -> Result<Vec<Donor>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donors
             WHERE status = 'Active'
               AND ($1::TEXT IS NULL OR blood_group = $1)
               AND ($2::TEXT IS NULL OR district = $2)
               AND ($3::TEXT IS NULL OR upazila = $3)
             ORDER BY name
             LIMIT $4"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(filter.blood_group.map(|g| g.as_str()))
            .bind(&filter.district)
            .bind(&filter.upazila)
            .bind(SEARCH_LIMIT)
            .fetch_all(pool)
            .await
    }

    /// Update a profile. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no donor with the given email exists.
    pub async fn update(
        pool: &PgPool,
        email: &str,
        input: &UpdateDonor,
    ) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!(
            "UPDATE donors SET
                name = COALESCE($2, name),
                avatar_url = COALESCE($3, avatar_url),
                blood_group = COALESCE($4, blood_group),
                district = COALESCE($5, district),
                upazila = COALESCE($6, upazila)
             WHERE email = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Donor>(&query)
            .bind(email)
            .bind(&input.name)
            .bind(&input.avatar_url)
            .bind(input.blood_group.map(|g| g.as_str()))
            .bind(&input.district)
            .bind(&input.upazila)
            .fetch_optional(pool)
            .await
    }

    /// Set a donor's account status. Returns the updated row.
    pub async fn set_status(
        pool: &PgPool,
        email: &str,
        status: AccountStatus,
    ) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!("UPDATE donors SET status = $2 WHERE email = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Donor>(&query)
            .bind(email)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Set a donor's role. Returns the updated row.
    pub async fn set_role(
        pool: &PgPool,
        email: &str,
        role: Role,
    ) -> Result<Option<Donor>, sqlx::Error> {
        let query = format!("UPDATE donors SET role = $2 WHERE email = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Donor>(&query)
            .bind(email)
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
    }
}
