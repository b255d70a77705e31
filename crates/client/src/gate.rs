//! Route guard for the protected screens.
//!
//! The guard allows a screen only for an authenticated, active user. A few
//! dashboard pages additionally need a staff or admin role.

use vitalflow_core::roles::{AccountStatus, Role};

use crate::session::Session;

/// Where unauthenticated users are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// Path prefixes that require a signed-in, active user.
const PROTECTED: &[&str] = &[
    "/dashboard",
    "/donation-request/",
    "/funding",
    "/payment-success",
    "/payment-cancelled",
];

/// Dashboard pages limited by role, most specific first.
const ROLE_PAGES: &[(&str, RoleRequirement)] = &[
    ("/dashboard/all-users", RoleRequirement::Admin),
    ("/dashboard/all-blood-donation-request", RoleRequirement::Staff),
    ("/dashboard/admin-stats", RoleRequirement::Staff),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleRequirement {
    Staff,
    Admin,
}

impl RoleRequirement {
    fn admits(self, role: Role) -> bool {
        match self {
            Self::Staff => role.is_staff(),
            Self::Admin => role.is_admin(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Identity still loading: show a spinner, do not navigate.
    Wait,
    /// Send to the login page, returning to `from` afterwards.
    Redirect { to: &'static str, from: String },
    /// Show the access-denied view instead of the screen.
    AccessDenied,
    Allow,
}

pub struct RouteGate;

impl RouteGate {
    pub fn is_protected(path: &str) -> bool {
        PROTECTED.iter().any(|prefix| matches_prefix(path, prefix))
    }

    pub fn evaluate(session: &Session, path: &str) -> GateDecision {
        if !Self::is_protected(path) {
            return GateDecision::Allow;
        }

        match session {
            Session::Loading => GateDecision::Wait,
            Session::Anonymous => GateDecision::Redirect {
                to: LOGIN_PATH,
                from: path.to_string(),
            },
            Session::Authenticated { status, role, .. } => {
                if *status != AccountStatus::Active {
                    return GateDecision::AccessDenied;
                }
                let required = ROLE_PAGES
                    .iter()
                    .find(|(prefix, _)| matches_prefix(path, prefix))
                    .map(|(_, requirement)| *requirement);
                match required {
                    Some(requirement) if !requirement.admits(*role) => GateDecision::AccessDenied,
                    _ => GateDecision::Allow,
                }
            }
        }
    }
}

/// `prefix` matches itself and anything below it. Prefixes ending in `/`
/// match only paths below them.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if prefix.ends_with('/') {
        return path.len() > prefix.len() && path.starts_with(prefix);
    }
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::models::AccountView;

    fn signed_in(role: Role, status: AccountStatus) -> Session {
        Session::Authenticated {
            user: AccountView {
                id: 1,
                email: "rahim@example.com".to_string(),
                display_name: "Rahim".to_string(),
                photo_url: None,
                created_at: Utc.with_ymd_and_hms(2026, 10, 1, 8, 0, 0).unwrap(),
            },
            role,
            status,
        }
    }

    #[test]
    fn anonymous_is_redirected_with_origin() {
        for path in ["/dashboard", "/dashboard/my-donation-requests", "/donation-request/42", "/funding"] {
            assert_eq!(
                RouteGate::evaluate(&Session::Anonymous, path),
                GateDecision::Redirect {
                    to: "/auth/login",
                    from: path.to_string(),
                }
            );
        }
    }

    #[test]
    fn blocked_user_sees_access_denied() {
        let session = signed_in(Role::Donor, AccountStatus::Blocked);
        assert_eq!(RouteGate::evaluate(&session, "/dashboard"), GateDecision::AccessDenied);
        assert_eq!(
            RouteGate::evaluate(&session, "/donation-request/7"),
            GateDecision::AccessDenied
        );
    }

    #[test]
    fn loading_waits_on_protected_paths_only() {
        assert_eq!(RouteGate::evaluate(&Session::Loading, "/dashboard"), GateDecision::Wait);
        assert_eq!(RouteGate::evaluate(&Session::Loading, "/"), GateDecision::Allow);
    }

    #[test]
    fn public_paths_are_open() {
        for path in ["/", "/donation-requests", "/search", "/auth/login", "/auth/register", "/blog"] {
            assert_eq!(RouteGate::evaluate(&Session::Anonymous, path), GateDecision::Allow);
        }
        assert!(!RouteGate::is_protected("/donation-request/"));
        assert!(!RouteGate::is_protected("/dashboards"));
    }

    #[test]
    fn active_user_may_open_own_pages() {
        let session = signed_in(Role::Donor, AccountStatus::Active);
        assert_eq!(RouteGate::evaluate(&session, "/dashboard/profile"), GateDecision::Allow);
        assert_eq!(
            RouteGate::evaluate(&session, "/payment-success?session_id=cs_1"),
            GateDecision::Allow
        );
    }

    #[test]
    fn role_pages_check_role() {
        let donor = signed_in(Role::Donor, AccountStatus::Active);
        let volunteer = signed_in(Role::Volunteer, AccountStatus::Active);
        let admin = signed_in(Role::Admin, AccountStatus::Active);

        assert_eq!(
            RouteGate::evaluate(&donor, "/dashboard/all-blood-donation-request"),
            GateDecision::AccessDenied
        );
        assert_eq!(
            RouteGate::evaluate(&volunteer, "/dashboard/all-blood-donation-request"),
            GateDecision::Allow
        );
        assert_eq!(
            RouteGate::evaluate(&volunteer, "/dashboard/all-users"),
            GateDecision::AccessDenied
        );
        assert_eq!(RouteGate::evaluate(&admin, "/dashboard/all-users"), GateDecision::Allow);
    }
}
