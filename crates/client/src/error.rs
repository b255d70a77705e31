use vitalflow_core::error::{CoreError, CredentialError};

/// Errors from the API client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status and an `{error, code}` body.
    #[error("API error ({status}) {code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The bearer token was rejected; it has been cleared and the user must
    /// sign in again.
    #[error("Your session has expired. Please sign in again.")]
    SessionExpired,

    /// Pre-submission validation failed.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Missing or unusable client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// The credential failure carried by an API error code, if any.
    pub fn credential(&self) -> Option<CredentialError> {
        match self {
            Self::Api { code, .. } => CredentialError::from_code(code),
            Self::Invalid(CoreError::Credentials(err)) => Some(*err),
            _ => None,
        }
    }

    /// Text for a transient notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::Request(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::SessionExpired | Self::Config(_) => self.to_string(),
            Self::Invalid(CoreError::Validation(msg)) => msg.clone(),
            Self::Invalid(other) => other.to_string(),
        }
    }
}
