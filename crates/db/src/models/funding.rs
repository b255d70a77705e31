//! Funding (payment ledger) model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitalflow_core::types::{DbId, Timestamp};

/// A row from the `fundings` table. Amounts are in the smallest currency unit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Funding {
    pub id: DbId,
    pub donor_email: String,
    pub donor_name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub transaction_id: String,
    pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateFunding {
    pub donor_email: String,
    pub donor_name: String,
    pub amount_cents: i64,
    pub currency: String,
    pub transaction_id: String,
}
