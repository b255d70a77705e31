//! Identity and profile seams.
//!
//! [`IdentityProvider`] owns credentials and the bearer token. [`ProfileApi`]
//! owns the donor profile. Both are traits so the session service and the
//! registration saga can be driven by in-memory fakes.

use async_trait::async_trait;
use vitalflow_core::error::{CoreError, CredentialError};
use vitalflow_core::forms::{AccountForm, LoginForm, ProfileForm};

use crate::error::ClientError;
use crate::http::{ApiClient, TokenStore};
use crate::models::{AccountView, DonorView, RoleView};

/// Failures surfaced by sign-in and sign-up, reduced to what a form can show.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("no account with this email")]
    UserNotFound,

    #[error("wrong password")]
    WrongPassword,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("email already registered")]
    EmailInUse,

    #[error("{0}")]
    Other(String),
}

impl IdentityError {
    /// Notification text for the login and register screens.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::WrongPassword => "Incorrect password. Please try again.",
            Self::UserNotFound => "No account found with this email.",
            Self::InvalidEmail => "Please enter a valid email address.",
            Self::EmailInUse => "An account with this email already exists.",
            Self::Other(_) => "Something went wrong. Please try again.",
        }
    }
}

impl From<CredentialError> for IdentityError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::UserNotFound => Self::UserNotFound,
            CredentialError::WrongPassword => Self::WrongPassword,
            CredentialError::InvalidEmail => Self::InvalidEmail,
            CredentialError::EmailInUse => Self::EmailInUse,
        }
    }
}

impl From<ClientError> for IdentityError {
    fn from(err: ClientError) -> Self {
        match err.credential() {
            Some(credential) => credential.into(),
            None => Self::Other(err.to_string()),
        }
    }
}

impl From<CoreError> for IdentityError {
    fn from(err: CoreError) -> Self {
        ClientError::Invalid(err).into()
    }
}

/// The account system behind sign-in.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account and sign it in.
    async fn create_account(&self, form: &AccountForm) -> Result<AccountView, IdentityError>;

    async fn sign_in(&self, form: &LoginForm) -> Result<AccountView, IdentityError>;

    /// The signed-in account, if the stored credentials are still valid.
    async fn current_user(&self) -> Result<Option<AccountView>, IdentityError>;

    /// Delete the signed-in account. Used to undo a half-finished sign-up.
    async fn delete_account(&self) -> Result<(), IdentityError>;

    async fn sign_out(&self);
}

/// Donor profile operations the session and sign-up depend on.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    async fn create_profile(&self, form: &ProfileForm) -> Result<DonorView, ClientError>;

    async fn role_of(&self, email: &str) -> Result<RoleView, ClientError>;
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn create_profile(&self, form: &ProfileForm) -> Result<DonorView, ClientError> {
        ApiClient::create_profile(self, form).await
    }

    async fn role_of(&self, email: &str) -> Result<RoleView, ClientError> {
        ApiClient::role_of(self, email).await
    }
}

/// [`IdentityProvider`] backed by the API's `/auth` endpoints.
///
/// Register and login go through the plain client so a 401 for bad
/// credentials is reported as such instead of as an expired session.
#[derive(Debug, Clone)]
pub struct ApiIdentity {
    plain: ApiClient,
    secure: ApiClient,
    tokens: TokenStore,
}

impl ApiIdentity {
    pub fn new(plain: ApiClient, secure: ApiClient, tokens: TokenStore) -> Self {
        Self {
            plain,
            secure,
            tokens,
        }
    }
}

#[async_trait]
impl IdentityProvider for ApiIdentity {
    async fn create_account(&self, form: &AccountForm) -> Result<AccountView, IdentityError> {
        form.validate()?;
        let session = self.plain.register(form).await?;
        self.tokens.set(session.access_token);
        tracing::info!(account_id = session.user.id, "Account created");
        Ok(session.user)
    }

    async fn sign_in(&self, form: &LoginForm) -> Result<AccountView, IdentityError> {
        form.validate()?;
        let session = self.plain.login(form).await?;
        self.tokens.set(session.access_token);
        Ok(session.user)
    }

    async fn current_user(&self) -> Result<Option<AccountView>, IdentityError> {
        if !self.tokens.is_set() {
            return Ok(None);
        }
        match self.secure.me().await {
            Ok(me) => Ok(Some(me.user)),
            Err(ClientError::SessionExpired) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_account(&self) -> Result<(), IdentityError> {
        self.secure.delete_account().await?;
        self.tokens.clear();
        Ok(())
    }

    async fn sign_out(&self) {
        self.tokens.clear();
    }
}
