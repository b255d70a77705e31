//! Field-level validation helpers shared by the server and the client.

use chrono::{NaiveDate, NaiveTime};
use validator::ValidateEmail;

use crate::error::{CoreError, CredentialError};

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Upper bound on requested blood units for a single request.
pub const MAX_UNITS: i32 = 10;

/// Maximum length of the free-text request message.
pub const MAX_MESSAGE_LENGTH: usize = 2_000;

/// Date format of `donation_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format of `donation_time`.
pub const TIME_FORMAT: &str = "%H:%M";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Check the registration password rules: length, one uppercase, one lowercase.
pub fn validate_password(password: &str) -> Result<(), CoreError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(CoreError::Validation(
            "Password must contain at least one uppercase letter".to_string(),
        ));
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(CoreError::Validation(
            "Password must contain at least one lowercase letter".to_string(),
        ));
    }
    Ok(())
}

/// Emails are the natural key for donors; compare them in one canonical form.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_ascii_lowercase()
}

/// Reject syntactically invalid email addresses.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.trim().to_string().validate_email() {
        Ok(())
    } else {
        Err(CoreError::Credentials(CredentialError::InvalidEmail))
    }
}

/// Require a non-blank value for a named form field.
pub fn require_non_empty(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        Err(CoreError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Units are optional; when given they must be within `1..=MAX_UNITS`.
pub fn validate_units(units: Option<i32>) -> Result<(), CoreError> {
    match units {
        Some(n) if !(1..=MAX_UNITS).contains(&n) => Err(CoreError::Validation(format!(
            "Units must be between 1 and {MAX_UNITS}"
        ))),
        _ => Ok(()),
    }
}

/// `donation_date` is a plain `YYYY-MM-DD` string.
pub fn validate_donation_date(date: &str) -> Result<(), CoreError> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| {
            CoreError::Validation(format!(
                "Invalid donation date '{date}'. Expected YYYY-MM-DD"
            ))
        })
}

/// `donation_time` is a plain 24-hour `HH:MM` string.
pub fn validate_donation_time(time: &str) -> Result<(), CoreError> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map(|_| ())
        .map_err(|_| {
            CoreError::Validation(format!("Invalid donation time '{time}'. Expected HH:MM"))
        })
}

/// Free-text message must fit the column.
pub fn validate_message(message: &str) -> Result<(), CoreError> {
    if message.len() > MAX_MESSAGE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message exceeds maximum length of {MAX_MESSAGE_LENGTH} characters"
        )));
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
