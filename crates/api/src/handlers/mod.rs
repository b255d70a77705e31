pub mod auth;
pub mod donors;
pub mod fundings;
pub mod requests;
pub mod stats;

use vitalflow_core::error::CoreError;

use crate::error::AppResult;
use crate::state::AppState;

/// Check a district/upazila pair against the location directory, when loaded.
pub(crate) fn check_location(state: &AppState, district: &str, upazila: &str) -> AppResult<()> {
    if let Some(locations) = &state.locations {
        locations.validate(district, upazila)?;
    }
    Ok(())
}

/// Emails are compared in their canonical form everywhere.
pub(crate) fn same_email(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b.trim())
}

pub(crate) fn forbidden(msg: &str) -> CoreError {
    CoreError::Forbidden(msg.to_string())
}
