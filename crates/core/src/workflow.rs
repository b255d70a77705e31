//! Donation request workflow: who may move a request where.
//!
//! Every surface that changes a request (the status endpoint, the edit and
//! delete endpoints, and the client's row menus) asks [`transition`]. The
//! client's button set comes from [`available_actions`], which is derived
//! from the same function, so the two can never disagree.
//!
//! ```text
//! (create) -> pending --accept--> inprogress --done-----> done
//!                                            \--cancel--> canceled
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::request_status::RequestStatus;
use crate::roles::Role;

/// The authenticated principal attempting an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub email: String,
    pub role: Role,
}

impl Actor {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    fn is(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}

/// The people attached to a request that the rules care about.
#[derive(Debug, Clone, Copy)]
pub struct RequestParties<'a> {
    pub owner_email: &'a str,
    pub assigned_donor_email: Option<&'a str>,
}

/// Row-level actions a screen may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestAction {
    View,
    Accept,
    MarkDone,
    Cancel,
    Edit,
    Delete,
}

impl RequestAction {
    pub const ALL: [RequestAction; 6] = [
        RequestAction::View,
        RequestAction::Accept,
        RequestAction::MarkDone,
        RequestAction::Cancel,
        RequestAction::Edit,
        RequestAction::Delete,
    ];
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequestAction::View => "view",
            RequestAction::Accept => "accept",
            RequestAction::MarkDone => "mark done",
            RequestAction::Cancel => "cancel",
            RequestAction::Edit => "edit",
            RequestAction::Delete => "delete",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Cannot {action} a request that is {from}")]
    NotAllowedFromStatus {
        from: RequestStatus,
        action: RequestAction,
    },

    #[error("Request is already {0}")]
    Terminal(RequestStatus),

    #[error("You cannot accept your own donation request")]
    OwnerCannotAccept,

    #[error("Only the requester, the assigned donor, or staff may {0} this request")]
    NotAParty(RequestAction),
}

impl From<TransitionError> for CoreError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::NotAllowedFromStatus { .. } | TransitionError::Terminal(_) => {
                CoreError::Conflict(err.to_string())
            }
            TransitionError::OwnerCannotAccept | TransitionError::NotAParty(_) => {
                CoreError::Forbidden(err.to_string())
            }
        }
    }
}

/// Apply `action` to a request in `current` status on behalf of `actor`.
///
/// Returns the status the request has after the action. `View`, `Edit` and
/// `Delete` leave the status unchanged.
pub fn transition(
    current: RequestStatus,
    action: RequestAction,
    actor: &Actor,
    parties: RequestParties<'_>,
) -> Result<RequestStatus, TransitionError> {
    let is_owner = actor.is(parties.owner_email);
    let is_assigned = parties
        .assigned_donor_email
        .is_some_and(|email| actor.is(email));

    match action {
        RequestAction::View => Ok(current),

        RequestAction::Accept => {
            require_status(current, RequestStatus::Pending, action)?;
            if is_owner {
                return Err(TransitionError::OwnerCannotAccept);
            }
            Ok(RequestStatus::InProgress)
        }

        RequestAction::MarkDone | RequestAction::Cancel => {
            require_status(current, RequestStatus::InProgress, action)?;
            if !(is_owner || is_assigned || actor.role.is_staff()) {
                return Err(TransitionError::NotAParty(action));
            }
            Ok(if action == RequestAction::MarkDone {
                RequestStatus::Done
            } else {
                RequestStatus::Canceled
            })
        }

        RequestAction::Edit => {
            require_status(current, RequestStatus::Pending, action)?;
            if !(is_owner || actor.role.is_admin()) {
                return Err(TransitionError::NotAParty(action));
            }
            Ok(current)
        }

        RequestAction::Delete => {
            if !(is_owner || actor.role.is_admin()) {
                return Err(TransitionError::NotAParty(action));
            }
            Ok(current)
        }
    }
}

fn require_status(
    current: RequestStatus,
    required: RequestStatus,
    action: RequestAction,
) -> Result<(), TransitionError> {
    if current == required {
        Ok(())
    } else if current.is_terminal() {
        Err(TransitionError::Terminal(current))
    } else {
        Err(TransitionError::NotAllowedFromStatus {
            from: current,
            action,
        })
    }
}

/// Every action `actor` may take on the request right now.
pub fn available_actions(
    current: RequestStatus,
    actor: &Actor,
    parties: RequestParties<'_>,
) -> Vec<RequestAction> {
    RequestAction::ALL
        .into_iter()
        .filter(|action| transition(current, *action, actor, parties).is_ok())
        .collect()
}

/// Map the target status of a status-update call to the action it implies.
///
/// `pending` is never a valid target: requests only move forward.
pub fn action_for_target(target: RequestStatus) -> Result<RequestAction, CoreError> {
    match target {
        RequestStatus::InProgress => Ok(RequestAction::Accept),
        RequestStatus::Done => Ok(RequestAction::MarkDone),
        RequestStatus::Canceled => Ok(RequestAction::Cancel),
        RequestStatus::Pending => Err(CoreError::Validation(
            "A request cannot be moved back to pending".to_string(),
        )),
    }
}
