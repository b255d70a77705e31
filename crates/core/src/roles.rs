//! User roles and account status.
//!
//! Stored as text in the `donors` table; the string forms must match the
//! `CHECK` constraints in the migrations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_DONOR: &str = "Donor";
pub const ROLE_VOLUNTEER: &str = "Volunteer";
pub const ROLE_ADMIN: &str = "Admin";

pub const STATUS_ACTIVE: &str = "Active";
pub const STATUS_BLOCKED: &str = "Blocked";

/// Role assigned to a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Donor,
    Volunteer,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Donor => ROLE_DONOR,
            Role::Volunteer => ROLE_VOLUNTEER,
            Role::Admin => ROLE_ADMIN,
        }
    }

    /// Volunteers and admins see and act on every request, not just their own.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Volunteer | Role::Admin)
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_DONOR => Ok(Role::Donor),
            ROLE_VOLUNTEER => Ok(Role::Volunteer),
            ROLE_ADMIN => Ok(Role::Admin),
            other => Err(CoreError::Validation(format!(
                "Invalid role '{other}'. Must be one of: {ROLE_DONOR}, {ROLE_VOLUNTEER}, {ROLE_ADMIN}"
            ))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether an account may use the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccountStatus {
    #[default]
    Active,
    Blocked,
}

impl AccountStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountStatus::Active => STATUS_ACTIVE,
            AccountStatus::Blocked => STATUS_BLOCKED,
        }
    }

    pub fn is_active(self) -> bool {
        self == AccountStatus::Active
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(AccountStatus::Active),
            STATUS_BLOCKED => Ok(AccountStatus::Blocked),
            other => Err(CoreError::Validation(format!(
                "Invalid account status '{other}'. Must be one of: {STATUS_ACTIVE}, {STATUS_BLOCKED}"
            ))),
        }
    }
}

impl TryFrom<String> for AccountStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
