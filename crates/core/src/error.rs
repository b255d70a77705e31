/// Reasons a credential check can fail.
///
/// These are kept distinct (rather than a single "invalid credentials") because
/// the sign-in screen shows a different message for each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    #[error("No account exists for this email")]
    UserNotFound,

    #[error("The password is incorrect")]
    WrongPassword,

    #[error("The email address is malformed")]
    InvalidEmail,

    #[error("An account already exists for this email")]
    EmailInUse,
}

impl CredentialError {
    /// Stable machine-readable code used in API error bodies.
    pub fn code(self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::WrongPassword => "WRONG_PASSWORD",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::EmailInUse => "EMAIL_IN_USE",
        }
    }

    /// Inverse of [`CredentialError::code`].
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER_NOT_FOUND" => Some(Self::UserNotFound),
            "WRONG_PASSWORD" => Some(Self::WrongPassword),
            "INVALID_EMAIL" => Some(Self::InvalidEmail),
            "EMAIL_IN_USE" => Some(Self::EmailInUse),
            _ => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Credentials rejected: {0}")]
    Credentials(#[from] CredentialError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] keyed by anything displayable.
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
