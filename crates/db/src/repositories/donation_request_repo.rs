//! Repository for the `donation_requests` table.

use sqlx::PgPool;
use vitalflow_core::blood_group::BloodGroup;
use vitalflow_core::request_status::RequestStatus;
use vitalflow_core::types::DbId;

use crate::models::donation_request::{
    CreateDonationRequest, DonationRequest, DonorAssignment, UpdateDonationRequest,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, requester_name, requester_email, recipient_name, recipient_district, \
                       recipient_upazila, full_address, hospital_name, blood_group, donation_date, \
                       donation_time, request_message, units, status, assigned_donor_name, \
                       assigned_donor_email, created_at, updated_at";

/// Provides CRUD and status operations for donation requests.
pub struct DonationRequestRepo;

impl DonationRequestRepo {
    /// Insert a new request in `pending` status, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDonationRequest,
    ) -> Result<DonationRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO donation_requests
                (requester_name, requester_email, recipient_name, recipient_district,
                 recipient_upazila, full_address, hospital_name, blood_group,
                 donation_date, donation_time, request_message, units)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(&input.requester_name)
            .bind(&input.requester_email)
            .bind(&input.recipient_name)
            .bind(&input.recipient_district)
            .bind(&input.recipient_upazila)
            .bind(&input.full_address)
            .bind(&input.hospital_name)
            .bind(input.blood_group.as_str())
            .bind(&input.donation_date)
            .bind(&input.donation_time)
            .bind(&input.request_message)
            .bind(input.units)
            .fetch_one(pool)
            .await
    }

    /// Find a request by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DonationRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donation_requests WHERE id = $1");
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Most recent pending requests (public listing).
    pub async fn list_recent_pending(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE status = 'pending'
             ORDER BY created_at DESC, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Pending requests, soonest donation first, optionally for one blood group.
    pub async fn list_urgent(
        pool: &PgPool,
        blood_group: Option<BloodGroup>,
        limit: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE status = 'pending'
               AND ($1::TEXT IS NULL OR blood_group = $1)
             ORDER BY donation_date ASC, donation_time ASC, id ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(blood_group.map(BloodGroup::as_str))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Requests created by `requester_email`, newest first.
    pub async fn list_for_requester(
        pool: &PgPool,
        requester_email: &str,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE requester_email = $1
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(requester_email)
            .bind(status.map(RequestStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count matching the same filter as [`DonationRequestRepo::list_for_requester`].
    pub async fn count_for_requester(
        pool: &PgPool,
        requester_email: &str,
        status: Option<RequestStatus>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM donation_requests
             WHERE requester_email = $1
               AND ($2::TEXT IS NULL OR status = $2)",
        )
        .bind(requester_email)
        .bind(status.map(RequestStatus::as_str))
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Every request, newest first, optionally filtered by status.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<RequestStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DonationRequest>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM donation_requests
             WHERE ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(status.map(RequestStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count matching the same filter as [`DonationRequestRepo::list_all`].
    pub async fn count_all(
        pool: &PgPool,
        status: Option<RequestStatus>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM donation_requests WHERE ($1::TEXT IS NULL OR status = $1)",
        )
        .bind(status.map(RequestStatus::as_str))
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Replace the editable fields of a request that is still `pending`.
    ///
    /// Returns `None` if the request does not exist or has left `pending`.
    pub async fn update_pending(
        pool: &PgPool,
        id: DbId,
        input: &UpdateDonationRequest,
    ) -> Result<Option<DonationRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE donation_requests SET
                recipient_name = $2,
                recipient_district = $3,
                recipient_upazila = $4,
                full_address = $5,
                hospital_name = $6,
                blood_group = $7,
                donation_date = $8,
                donation_time = $9,
                request_message = $10,
                units = $11
             WHERE id = $1 AND status = 'pending'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(id)
            .bind(&input.recipient_name)
            .bind(&input.recipient_district)
            .bind(&input.recipient_upazila)
            .bind(&input.full_address)
            .bind(&input.hospital_name)
            .bind(input.blood_group.as_str())
            .bind(&input.donation_date)
            .bind(&input.donation_time)
            .bind(&input.request_message)
            .bind(input.units)
            .fetch_optional(pool)
            .await
    }

    /// Move a request from `expected` to `next`, optionally stamping the
    /// accepting donor.
    ///
    /// The update only applies while the row is still in `expected`, so of two
    /// racing transitions exactly one succeeds. Returns `None` when the row is
    /// missing or its status already moved.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        expected: RequestStatus,
        next: RequestStatus,
        assignment: Option<&DonorAssignment>,
    ) -> Result<Option<DonationRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE donation_requests SET
                status = $3,
                assigned_donor_name = COALESCE($4, assigned_donor_name),
                assigned_donor_email = COALESCE($5, assigned_donor_email)
             WHERE id = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DonationRequest>(&query)
            .bind(id)
            .bind(expected.as_str())
            .bind(next.as_str())
            .bind(assignment.map(|a| a.name.as_str()))
            .bind(assignment.map(|a| a.email.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a request. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM donation_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
