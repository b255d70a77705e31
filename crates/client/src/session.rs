//! The signed-in user as an explicit value.
//!
//! Screens receive a [`SessionService`] (or a [`Session`] snapshot) instead of
//! reading ambient state. Role and status always come from the profile
//! endpoint; the identity provider only knows who the user is.

use std::sync::RwLock;

use vitalflow_core::forms::LoginForm;
use vitalflow_core::roles::{AccountStatus, Role};
use vitalflow_core::workflow::Actor;

use crate::error::ClientError;
use crate::identity::{IdentityError, IdentityProvider, ProfileApi};
use crate::models::AccountView;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    /// Identity or role lookup still in flight.
    #[default]
    Loading,
    Anonymous,
    Authenticated {
        user: AccountView,
        role: Role,
        status: AccountStatus,
    },
}

impl Session {
    pub fn user(&self) -> Option<&AccountView> {
        match self {
            Self::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Self::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<AccountStatus> {
        match self {
            Self::Authenticated { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }

    /// The principal the workflow rules evaluate.
    pub fn actor(&self) -> Option<Actor> {
        match self {
            Self::Authenticated { user, role, .. } => Some(Actor::new(user.email.clone(), *role)),
            _ => None,
        }
    }
}

/// Login, logout and refresh against an identity provider and the role endpoint.
pub struct SessionService<I, P> {
    identity: I,
    profiles: P,
    state: RwLock<Session>,
}

impl<I: IdentityProvider, P: ProfileApi> SessionService<I, P> {
    pub fn new(identity: I, profiles: P) -> Self {
        Self {
            identity,
            profiles,
            state: RwLock::new(Session::Loading),
        }
    }

    pub fn identity(&self) -> &I {
        &self.identity
    }

    pub fn profiles(&self) -> &P {
        &self.profiles
    }

    /// Snapshot of the current session.
    pub fn current(&self) -> Session {
        self.state
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Re-read the signed-in user and their role, e.g. on start-up.
    pub async fn refresh(&self) -> Result<Session, IdentityError> {
        self.set(Session::Loading);
        let user = match self.identity.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return Ok(self.set(Session::Anonymous)),
            Err(err) => {
                self.set(Session::Anonymous);
                return Err(err);
            }
        };
        Ok(self.establish(user).await?)
    }

    pub async fn login(&self, form: &LoginForm) -> Result<Session, IdentityError> {
        let user = self.identity.sign_in(form).await?;
        Ok(self.establish(user).await?)
    }

    pub async fn logout(&self) -> Session {
        self.identity.sign_out().await;
        tracing::debug!("Signed out");
        self.set(Session::Anonymous)
    }

    /// Look up the role and status of a freshly signed-in account.
    ///
    /// An account without a profile yet is treated as an active donor.
    pub async fn establish(&self, user: AccountView) -> Result<Session, ClientError> {
        match self.profiles.role_of(&user.email).await {
            Ok(found) => Ok(self.set(Session::Authenticated {
                user,
                role: found.role,
                status: found.status,
            })),
            Err(err) if err.is_not_found() => {
                tracing::warn!(email = %user.email, "No donor profile, using default role");
                Ok(self.set(Session::Authenticated {
                    user,
                    role: Role::default(),
                    status: AccountStatus::default(),
                }))
            }
            Err(ClientError::SessionExpired) => Ok(self.set(Session::Anonymous)),
            Err(err) => {
                self.set(Session::Anonymous);
                Err(err)
            }
        }
    }

    fn set(&self, session: Session) -> Session {
        *self
            .state
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session.clone();
        session
    }
}
