//! Sign-up as a sequence of steps with compensation.
//!
//! ```text
//! validate -> upload avatar -> create account -> create profile
//!                  |                 |
//!            DiscardImage      DeleteAccount      (undo, run in reverse)
//! ```
//!
//! Each completed step pushes the action that undoes it. When a later step
//! fails, the pushed actions run newest first and the original failure is
//! returned together with any undo that itself failed.

use std::fmt;

use vitalflow_core::error::CoreError;
use vitalflow_core::forms::RegistrationForm;

use crate::error::ClientError;
use crate::identity::{IdentityError, IdentityProvider, ProfileApi};
use crate::image_host::{AvatarUpload, HostedImage, ImageHost};
use crate::models::{AccountView, DonorView};
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    Validate,
    UploadAvatar,
    CreateAccount,
    CreateProfile,
}

impl fmt::Display for RegistrationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Validate => "validation",
            Self::UploadAvatar => "avatar upload",
            Self::CreateAccount => "account creation",
            Self::CreateProfile => "profile creation",
        })
    }
}

/// Undo action for a completed step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compensation {
    DiscardImage(HostedImage),
    DeleteAccount,
}

#[derive(Debug, thiserror::Error)]
pub enum StepFailure {
    #[error(transparent)]
    Invalid(CoreError),

    #[error(transparent)]
    Identity(IdentityError),

    #[error(transparent)]
    Client(ClientError),
}

impl StepFailure {
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(CoreError::Validation(msg)) => msg.clone(),
            Self::Invalid(CoreError::Credentials(err)) => {
                IdentityError::from(*err).user_message().to_string()
            }
            Self::Invalid(other) => other.to_string(),
            Self::Identity(err) => err.user_message().to_string(),
            Self::Client(err) => err.user_message(),
        }
    }
}

/// An undo action that did not complete.
#[derive(Debug)]
pub struct CompensationFailure {
    pub compensation: Compensation,
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Registration failed during {step}: {failure}")]
pub struct RegistrationError {
    pub step: RegistrationStep,
    pub failure: StepFailure,
    pub compensation_failures: Vec<CompensationFailure>,
}

/// A completed sign-up.
#[derive(Debug, Clone)]
pub struct RegistrationOutcome {
    pub account: AccountView,
    pub profile: DonorView,
}

impl RegistrationOutcome {
    /// Session for the new user, from the profile just created.
    pub fn session(&self) -> Session {
        Session::Authenticated {
            user: self.account.clone(),
            role: self.profile.role,
            status: self.profile.status,
        }
    }
}

pub struct RegistrationSaga<I, H, P> {
    identity: I,
    images: H,
    profiles: P,
}

impl<I, H, P> RegistrationSaga<I, H, P>
where
    I: IdentityProvider,
    H: ImageHost,
    P: ProfileApi,
{
    pub fn new(identity: I, images: H, profiles: P) -> Self {
        Self {
            identity,
            images,
            profiles,
        }
    }

    pub async fn run(
        &self,
        form: &RegistrationForm,
        avatar: Option<AvatarUpload>,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        let mut undo: Vec<Compensation> = Vec::new();

        if let Err(err) = form.validate() {
            return Err(self
                .abort(RegistrationStep::Validate, StepFailure::Invalid(err), undo)
                .await);
        }

        let image = match avatar {
            Some(upload) => match self.images.upload(&upload).await {
                Ok(image) => {
                    undo.push(Compensation::DiscardImage(image.clone()));
                    Some(image)
                }
                Err(err) => {
                    return Err(self
                        .abort(RegistrationStep::UploadAvatar, StepFailure::Client(err), undo)
                        .await)
                }
            },
            None => None,
        };
        let image_url = image.map(|i| i.url);

        let account = match self
            .identity
            .create_account(&form.account(image_url.clone()))
            .await
        {
            Ok(account) => {
                undo.push(Compensation::DeleteAccount);
                account
            }
            Err(err) => {
                return Err(self
                    .abort(RegistrationStep::CreateAccount, StepFailure::Identity(err), undo)
                    .await)
            }
        };

        match self.profiles.create_profile(&form.profile(image_url)).await {
            Ok(profile) => {
                tracing::info!(email = %account.email, "Registration complete");
                Ok(RegistrationOutcome { account, profile })
            }
            Err(err) => Err(self
                .abort(RegistrationStep::CreateProfile, StepFailure::Client(err), undo)
                .await),
        }
    }

    /// Run `undo` newest first and build the error.
    async fn abort(
        &self,
        step: RegistrationStep,
        failure: StepFailure,
        mut undo: Vec<Compensation>,
    ) -> RegistrationError {
        tracing::warn!(%step, error = %failure, pending = undo.len(), "Registration failed");

        let mut compensation_failures = Vec::new();
        while let Some(compensation) = undo.pop() {
            let result = match &compensation {
                Compensation::DeleteAccount => {
                    self.identity.delete_account().await.map_err(|e| e.to_string())
                }
                Compensation::DiscardImage(image) => {
                    self.images.discard(image).await.map_err(|e| e.to_string())
                }
            };
            if let Err(error) = result {
                tracing::error!(?compensation, %error, "Compensation failed");
                compensation_failures.push(CompensationFailure {
                    compensation,
                    error,
                });
            }
        }

        RegistrationError {
            step,
            failure,
            compensation_failures,
        }
    }
}
