//! Identity account model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use vitalflow_core::types::{DbId, Timestamp};

/// Full row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub created_at: Timestamp,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.clone(),
            display_name: account.display_name.clone(),
            photo_url: account.photo_url.clone(),
            created_at: account.created_at,
        }
    }
}

/// DTO for creating a new account. The email is already normalized.
#[derive(Debug)]
pub struct CreateAccount {
    pub email: String,
    pub password_hash: String,
    pub display_name: String,
    pub photo_url: Option<String>,
}
