//! Donation request lifecycle status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_INPROGRESS: &str = "inprogress";
pub const STATUS_DONE: &str = "done";
pub const STATUS_CANCELED: &str = "canceled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Canceled,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::InProgress,
        RequestStatus::Done,
        RequestStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => STATUS_PENDING,
            RequestStatus::InProgress => STATUS_INPROGRESS,
            RequestStatus::Done => STATUS_DONE,
            RequestStatus::Canceled => STATUS_CANCELED,
        }
    }

    /// No transition leaves `done` or `canceled`.
    pub fn is_terminal(self) -> bool {
        matches!(self, RequestStatus::Done | RequestStatus::Canceled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status '{s}'. Must be one of: {}",
                    RequestStatus::ALL.map(RequestStatus::as_str).join(", ")
                ))
            })
    }
}

impl TryFrom<String> for RequestStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Parse the optional `filter` query parameter of list endpoints.
///
/// Missing, empty, and `all` mean "no filter".
pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<RequestStatus>, CoreError> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(value) => value.parse().map(Some),
    }
}
